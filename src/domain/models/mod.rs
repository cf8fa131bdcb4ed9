pub mod catalog;
pub mod config;
pub mod conversation;
pub mod mbti;
pub mod perma;
pub mod profile;
pub mod question;
pub mod response;

pub use catalog::{Catalog, CatalogAsset, CatalogError};
pub use config::{AssessmentSettings, Config, GuidanceSettings, LoggingConfig, ProfileSettings};
pub use conversation::{ConversationPhase, ConversationState, Notice, Progress};
pub use mbti::{MbtiDimension, MbtiType, MbtiValidation};
pub use perma::{PermaDimension, PermaScores, SubAnswers};
pub use profile::{ContentConfig, Profile, WellnessConfig};
pub use question::{Question, QuestionBranch, QuestionKind, SliderRange};
pub use response::{Response, Responses};
