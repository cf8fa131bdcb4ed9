//! Scripted runs through the assessment engine.
//!
//! A script is a YAML or JSON document:
//!
//! ```yaml
//! steps:
//!   - answer: Sam
//!   - answer: "No, I'm not sure"
//!   - back: true
//!   - toggle: Music
//!   - submit_selection: true
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{load_engine, read_document, AnswerValue, ProfileOutput};
use crate::cli::display::{output, CommandOutput, DetailView};
use crate::domain::models::{Config, ConversationState, Notice, Progress};
use crate::services::AssessmentEngine;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Script file (YAML or JSON)
    pub script: PathBuf,

    /// Catalog asset to use instead of the configured one
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// A replay script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

/// One user action; exactly one field should be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerValue>,
    #[serde(default)]
    pub back: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle: Option<String>,
    #[serde(default)]
    pub submit_selection: bool,
}

/// Apply one step to `state`.
pub fn apply_step(
    engine: &AssessmentEngine,
    state: &ConversationState,
    step: &ScriptStep,
) -> Result<ConversationState> {
    let actions = usize::from(step.answer.is_some())
        + usize::from(step.back)
        + usize::from(step.toggle.is_some())
        + usize::from(step.submit_selection);
    if actions != 1 {
        anyhow::bail!("each step needs exactly one of answer, back, toggle or submit_selection");
    }

    let next = if step.back {
        engine.go_back(state)
    } else if step.submit_selection {
        engine.submit_selection(state)?
    } else if let Some(option) = &step.toggle {
        engine.toggle_selection(state, option)?
    } else if let Some(answer) = &step.answer {
        match engine.current_question(state)? {
            Some(question) => engine.submit_answer(state, answer.for_question(question))?,
            None => state.clone(),
        }
    } else {
        state.clone()
    };
    Ok(next)
}

/// Run a whole script from a fresh session.
pub fn run_script(engine: &AssessmentEngine, script: &Script) -> Result<ConversationState> {
    let mut state = engine.start_assessment();
    for (index, step) in script.steps.iter().enumerate() {
        state = apply_step(engine, &state, step).context(format!("Step {} failed", index + 1))?;
        debug!(step = index + 1, current = ?state.current_question_id(), "replayed step");
    }
    Ok(state)
}

/// Where an unfinished script left the conversation.
#[derive(Debug, Serialize)]
pub struct StateOutput {
    pub current_question: Option<String>,
    pub prompt: Option<String>,
    pub notice: Option<Notice>,
    pub knows_own_type: bool,
    pub invalid_mbti_attempts: u32,
    pub progress: Progress,
    pub state: ConversationState,
}

impl CommandOutput for StateOutput {
    fn to_human(&self) -> String {
        let mut view = DetailView::new("Assessment in progress")
            .field(
                "Current",
                self.current_question.as_deref().unwrap_or("(complete)"),
            )
            .field(
                "Progress",
                &format!(
                    "{} answered, {} remaining ({}%)",
                    self.progress.answered,
                    self.progress.remaining,
                    self.progress.percent()
                ),
            )
            .field("Knows type", if self.knows_own_type { "yes" } else { "no" });
        if let Some(prompt) = &self.prompt {
            view = view.field("Prompt", prompt);
        }
        if let Some(notice) = self.notice {
            view = view.field("Notice", notice.message());
        }
        view.render()
    }
}

pub async fn execute(args: ReplayArgs, config: &Config, json_mode: bool) -> Result<()> {
    let engine = load_engine(config, args.catalog.as_deref()).await?;
    let script: Script = read_document(&args.script).await?;
    let state = run_script(&engine, &script)?;

    if state.is_complete() {
        let profile = engine
            .synthesize_profile(&state)
            .context("Failed to synthesize profile")?;
        output(&ProfileOutput::build(&engine, config, profile), json_mode);
        return Ok(());
    }

    let question = engine.current_question(&state)?;
    let out = StateOutput {
        current_question: question.map(|q| q.id.clone()),
        prompt: question.map(|q| q.prompt.clone()),
        notice: state.notice(),
        knows_own_type: state.knows_own_type(),
        invalid_mbti_attempts: state.invalid_mbti_attempts(),
        progress: engine.progress(&state)?,
        state,
    };
    output(&out, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
steps:
  - answer: Sam
  - answer: "Yes, I know my type"
  - answer: xyz1
  - answer: notreal
  - answer: E
  - back: true
  - answer: I
"#;

    #[test]
    fn test_script_parses_and_runs() {
        let script: Script = serde_yaml::from_str(SCRIPT).unwrap();
        assert_eq!(script.steps.len(), 7);
        assert!(script.steps[5].back);

        let engine = AssessmentEngine::default();
        let state = run_script(&engine, &script).unwrap();
        assert_eq!(state.current_question_id(), Some("mbti_sn"));
        assert_eq!(state.responses().text("mbti_ei"), Some("I - Quiet time on my own"));
        assert!(!state.knows_own_type());
    }

    #[test]
    fn test_step_needs_exactly_one_action() {
        let engine = AssessmentEngine::default();
        let state = engine.start_assessment();
        let step = ScriptStep {
            back: true,
            submit_selection: true,
            ..ScriptStep::default()
        };
        assert!(apply_step(&engine, &state, &step).is_err());
        assert!(apply_step(&engine, &state, &ScriptStep::default()).is_err());
    }

    #[test]
    fn test_failing_step_is_numbered() {
        let engine = AssessmentEngine::default();
        let script = Script {
            steps: vec![
                ScriptStep {
                    answer: Some(AnswerValue::Text("Sam".into())),
                    ..ScriptStep::default()
                },
                ScriptStep {
                    answer: Some(AnswerValue::Text("Maybe".into())),
                    ..ScriptStep::default()
                },
            ],
        };
        let err = run_script(&engine, &script).unwrap_err();
        assert_eq!(err.to_string(), "Step 2 failed");
    }
}
