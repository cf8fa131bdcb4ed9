//! Compass - adaptive assessment and profile synthesis
//!
//! Compass drives a branching, chat-style questionnaire and turns the answers
//! into a personality and wellbeing profile: a four-letter MBTI-style type,
//! five PERMA scores, interests and communication preferences. From the
//! scores it derives a prioritized guidance narrative.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): catalog, responses, conversation state, profile
//! - **Service Layer** (`services`): the conversation state machine, profile
//!   synthesis and guidance generation, all pure and synchronous
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging and
//!   catalog assets
//! - **CLI Layer** (`cli`): the `compass` command-line interface
//!
//! # Example
//!
//! ```
//! use compass::{AssessmentEngine, Response};
//!
//! let engine = AssessmentEngine::default();
//! let state = engine.start_assessment();
//! let state = engine
//!     .submit_answer(&state, Response::Single("Sam".into()))
//!     .unwrap();
//! assert_eq!(state.current_question_id(), Some("mbti_know"));
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Catalog, Config, ConversationPhase, ConversationState, MbtiType, Notice, PermaDimension,
    PermaScores, Profile, Progress, Question, QuestionBranch, QuestionKind, Response, Responses,
    SubAnswers,
};
pub use domain::{AssessmentError, DomainResult};
pub use services::{AssessmentEngine, GuidanceGenerator, ProfileSynthesizer};
