//! Common test utilities for integration tests
//!
//! Shared fixtures and helpers for driving the assessment engine.

#![allow(dead_code)]

use compass::domain::models::catalog::{DIRECT_ENTRY_ID, KNOWS_TYPE_OPTION, UNSURE_OPTION};
use compass::{AssessmentEngine, ConversationState, QuestionKind, Response};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Setup test logging
///
/// Initializes a tracing subscriber writing to the test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn single(value: &str) -> Response {
    Response::Single(value.to_string())
}

/// Submit an answer that must be accepted.
pub fn answer(engine: &AssessmentEngine, state: &ConversationState, response: Response) -> ConversationState {
    engine
        .submit_answer(state, response)
        .expect("answer should be accepted")
}

/// A plausible answer for whatever question is current.
///
/// Select questions get their first option, sliders `slider`, the
/// direct-entry question `code`, other text questions a fixed string.
pub fn default_answer(engine: &AssessmentEngine, state: &ConversationState, slider: f64, code: &str) -> Response {
    let question = engine
        .current_question(state)
        .expect("current question should exist")
        .expect("state should not be complete");
    match question.kind {
        QuestionKind::SingleSelect => Response::Single(question.options[0].clone()),
        QuestionKind::MultiSelect => Response::Multi(vec![question.options[0].clone()]),
        QuestionKind::Slider => Response::Slider(slider),
        QuestionKind::FreeText if question.id == DIRECT_ENTRY_ID => single(code),
        QuestionKind::FreeText => single("Sam"),
    }
}

/// Answer with defaults until `target` is current.
pub fn advance_to(engine: &AssessmentEngine, mut state: ConversationState, target: &str) -> ConversationState {
    while state.current_question_id() != Some(target) {
        let response = default_answer(engine, &state, 5.0, "INFJ");
        state = answer(engine, &state, response);
    }
    state
}

/// Answer the name and gating questions.
pub fn through_gating(engine: &AssessmentEngine, knows_type: bool) -> ConversationState {
    let state = engine.start_assessment();
    let state = answer(engine, &state, single("Sam"));
    let gating = if knows_type { KNOWS_TYPE_OPTION } else { UNSURE_OPTION };
    answer(engine, &state, single(gating))
}

/// Answer with defaults until complete.
pub fn finish(engine: &AssessmentEngine, mut state: ConversationState, slider: f64) -> ConversationState {
    while !state.is_complete() {
        let response = default_answer(engine, &state, slider, "INFJ");
        state = answer(engine, &state, response);
    }
    state
}
