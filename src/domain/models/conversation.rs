//! Conversation state for one in-progress assessment.
//!
//! The state is a plain value: every engine call takes it by reference and
//! returns the next one. Only the state machine in
//! `services::assessment_engine` builds new states.
//!
//! ```text
//! AwaitingAnswer(first) → AwaitingAnswer(next) → ... → Complete
//!          ↑__________________ go back ___________________|
//! ```

use serde::{Deserialize, Serialize};

use super::response::Responses;

/// Where the conversation is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConversationPhase {
    /// Waiting for an answer to the named question.
    AwaitingAnswer { question_id: String },
    /// No eligible question remains; responses are ready for synthesis.
    Complete,
}

/// User-facing re-prompt messaging emitted by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The direct-entry code was not recognized; ask again.
    MbtiFormatHint,
    /// Direct entry was abandoned for the dimension questions.
    MbtiRerouted,
}

impl Notice {
    /// Text shown alongside the next prompt.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MbtiFormatHint => {
                "Hmm, I don't recognize that type. It should be four letters, like INFJ or ESTP."
            }
            Self::MbtiRerouted => {
                "No problem! Let's figure out your type together with a few quick questions."
            }
        }
    }
}

/// State of one assessment session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub(crate) phase: ConversationPhase,
    pub(crate) history: Vec<String>,
    pub(crate) responses: Responses,
    pub(crate) knows_own_type: bool,
    pub(crate) invalid_mbti_attempts: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) pending_selection: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) notice: Option<Notice>,
}

impl ConversationState {
    /// Fresh state awaiting the given first question.
    pub(crate) fn starting_at(first_question_id: &str) -> Self {
        Self {
            phase: ConversationPhase::AwaitingAnswer {
                question_id: first_question_id.to_string(),
            },
            history: vec![first_question_id.to_string()],
            responses: Responses::new(),
            knows_own_type: false,
            invalid_mbti_attempts: 0,
            pending_selection: Vec::new(),
            notice: None,
        }
    }

    pub fn phase(&self) -> &ConversationPhase {
        &self.phase
    }

    /// The question awaiting an answer, `None` once complete.
    pub fn current_question_id(&self) -> Option<&str> {
        match &self.phase {
            ConversationPhase::AwaitingAnswer { question_id } => Some(question_id),
            ConversationPhase::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, ConversationPhase::Complete)
    }

    /// Visited question ids, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    /// Responses handed to synthesis; only available once complete.
    pub fn completed_responses(&self) -> Option<&Responses> {
        self.is_complete().then_some(&self.responses)
    }

    pub fn knows_own_type(&self) -> bool {
        self.knows_own_type
    }

    pub fn invalid_mbti_attempts(&self) -> u32 {
        self.invalid_mbti_attempts
    }

    /// Options toggled on for the current multi-select question.
    pub fn pending_selection(&self) -> &[String] {
        &self.pending_selection
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Going back needs at least one step to undo. A complete state can
    /// always reopen its last question.
    pub fn can_go_back(&self) -> bool {
        if self.is_complete() {
            !self.history.is_empty()
        } else {
            self.history.len() > 1
        }
    }
}

/// Answered versus remaining questions, for a chat progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Questions answered on the current path
    pub answered: usize,
    /// Eligible questions still ahead, including the current one
    pub remaining: usize,
}

impl Progress {
    pub fn total(&self) -> usize {
        self.answered + self.remaining
    }

    /// Completion percentage in [0, 100].
    pub fn percent(&self) -> u8 {
        if self.total() == 0 {
            return 100;
        }
        u8::try_from(self.answered * 100 / self.total()).unwrap_or(100)
    }
}
