//! Domain errors for the assessment engine.

use thiserror::Error;

use super::models::question::QuestionKind;

/// Integrity errors raised by the assessment engine.
///
/// None of these are shown to the end user. An invalid MBTI code is not an
/// error at all; it is handled by the retry-then-reroute flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    /// A question id that the catalog does not contain. Always a wiring bug.
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    /// The submitted value does not fit the current question's kind.
    #[error("Malformed response for '{question_id}' ({kind}): {reason}")]
    MalformedResponse {
        question_id: String,
        kind: QuestionKind,
        reason: String,
    },

    /// Synthesis found a required answer missing or unreadable.
    #[error("Incomplete profile: {0}")]
    IncompleteProfile(String),
}

impl AssessmentError {
    pub(crate) fn malformed(
        question_id: impl Into<String>,
        kind: QuestionKind,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedResponse {
            question_id: question_id.into(),
            kind,
            reason: reason.into(),
        }
    }

    /// Whether the caller can recover by re-prompting the same question.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}

/// Result alias used throughout the domain and service layers.
pub type DomainResult<T> = Result<T, AssessmentError>;
