//! The question catalog.
//!
//! An ordered, immutable sequence of questions. Traversal normally follows
//! catalog order; the gating question and the direct-entry validator jump
//! within it. The engine and the profile synthesizer depend on a fixed set of
//! contract ids, checked by [`Catalog::new`] for catalogs loaded from assets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::errors::{AssessmentError, DomainResult};

use super::mbti::MbtiDimension;
use super::perma::{PermaDimension, MAX_SCORE, MIN_SCORE};
use super::question::{Question, QuestionBranch, QuestionKind};

/// Free-text name question.
pub const NAME_ID: &str = "name";
/// Gating question deciding whether the dimension questions are shown.
pub const GATING_ID: &str = "mbti_know";
/// Direct-entry type code question.
pub const DIRECT_ENTRY_ID: &str = "mbti_type";
/// Multi-select interests question.
pub const INTERESTS_ID: &str = "interests";
/// Preferred communication style question.
pub const COMMUNICATION_STYLE_ID: &str = "communication_style";
/// Primary goal question.
pub const PRIMARY_GOAL_ID: &str = "primary_goal";

/// Gating option meaning "I know my type".
pub const KNOWS_TYPE_OPTION: &str = "Yes, I know my type";
/// Gating option meaning "I don't know my type".
pub const UNSURE_OPTION: &str = "No, I'm not sure";

/// Structural problems in a catalog asset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog contains no questions")]
    Empty,

    #[error("Duplicate question id: {0}")]
    DuplicateId(String),

    #[error("Question '{0}' has an empty prompt")]
    EmptyPrompt(String),

    #[error("Question '{0}' is a select question without options")]
    MissingOptions(String),

    #[error("Question '{0}' is a slider without a valid range")]
    InvalidRange(String),

    #[error("Required question '{0}' is missing")]
    MissingContractQuestion(String),

    #[error("Question '{id}' must be {expected}, found {actual}")]
    WrongKind {
        id: String,
        expected: QuestionKind,
        actual: QuestionKind,
    },

    #[error("Question '{id}' must be on the {expected:?} branch")]
    WrongBranch {
        id: String,
        expected: QuestionBranch,
    },

    #[error("Question '{0}' must come after the gating question")]
    OutOfOrder(String),

    #[error("Catalog validation failed: {0}")]
    ValidationFailed(String),
}

/// Serialized form of a catalog asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogAsset {
    pub version: String,
    pub questions: Vec<Question>,
}

/// Ordered, immutable question catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    questions: Vec<Question>,
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Version of the built-in catalog.
    pub const VERSION: &'static str = "2024.1";

    /// Build a catalog, validating ids, shapes and the engine's contract ids.
    pub fn new(version: impl Into<String>, questions: Vec<Question>) -> Result<Self, CatalogError> {
        Self::validate_questions(&questions)?;
        let catalog = Self::indexed(version.into(), questions);
        catalog.validate_contract()?;
        Ok(catalog)
    }

    pub fn from_asset(asset: CatalogAsset) -> Result<Self, CatalogError> {
        Self::new(asset.version, asset.questions)
    }

    pub fn to_asset(&self) -> CatalogAsset {
        CatalogAsset {
            version: self.version.clone(),
            questions: self.questions.clone(),
        }
    }

    fn indexed(version: String, questions: Vec<Question>) -> Self {
        let positions = questions
            .iter()
            .enumerate()
            .map(|(i, q)| (q.id.clone(), i))
            .collect();
        Self {
            version,
            questions,
            positions,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of questions, eligible or not.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn index_of(&self, id: &str) -> DomainResult<usize> {
        self.positions
            .get(id)
            .copied()
            .ok_or_else(|| AssessmentError::UnknownQuestion(id.to_string()))
    }

    pub fn get(&self, id: &str) -> DomainResult<&Question> {
        let index = self.index_of(id)?;
        Ok(&self.questions[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// True exactly for the four MBTI dimension questions.
    pub fn is_conditional(&self, id: &str) -> DomainResult<bool> {
        self.index_of(id)?;
        Ok(MbtiDimension::from_question_id(id).is_some())
    }

    pub fn first(&self) -> Option<&Question> {
        self.questions.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// First eligible question strictly after `index` in catalog order.
    pub fn next_eligible(&self, index: usize, knows_own_type: bool) -> Option<&Question> {
        self.questions
            .iter()
            .skip(index + 1)
            .find(|q| q.branch.is_eligible(knows_own_type))
    }

    /// Count of eligible questions strictly after `index`.
    pub fn eligible_after(&self, index: usize, knows_own_type: bool) -> usize {
        self.questions
            .iter()
            .skip(index + 1)
            .filter(|q| q.branch.is_eligible(knows_own_type))
            .count()
    }

    /// The dimension question the validator fallback reroutes to.
    pub fn first_dimension_question(&self) -> DomainResult<&Question> {
        self.questions
            .iter()
            .find(|q| MbtiDimension::from_question_id(&q.id).is_some())
            .ok_or_else(|| {
                AssessmentError::UnknownQuestion(MbtiDimension::EnergySource.question_id().into())
            })
    }

    /// Whether a gating answer means "I know my type".
    ///
    /// The gating question's first option is the "knows" answer.
    pub fn gating_answer_knows_type(&self, answer: &str) -> DomainResult<bool> {
        let gating = self.get(GATING_ID)?;
        Ok(gating.options.first().is_some_and(|o| o == answer))
    }

    fn validate_questions(questions: &[Question]) -> Result<(), CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = std::collections::HashSet::new();
        for question in questions {
            if !seen.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateId(question.id.clone()));
            }
            if question.prompt.trim().is_empty() {
                return Err(CatalogError::EmptyPrompt(question.id.clone()));
            }
            if question.kind.has_options() && question.options.is_empty() {
                return Err(CatalogError::MissingOptions(question.id.clone()));
            }
            if question.kind == QuestionKind::Slider
                && !question.range.is_some_and(|r| r.is_well_formed())
            {
                return Err(CatalogError::InvalidRange(question.id.clone()));
            }
        }
        Ok(())
    }

    fn require(&self, id: &str, kind: QuestionKind, branch: QuestionBranch) -> Result<&Question, CatalogError> {
        let question = self
            .get(id)
            .map_err(|_| CatalogError::MissingContractQuestion(id.to_string()))?;
        if question.kind != kind {
            return Err(CatalogError::WrongKind {
                id: id.to_string(),
                expected: kind,
                actual: question.kind,
            });
        }
        if question.branch != branch {
            return Err(CatalogError::WrongBranch {
                id: id.to_string(),
                expected: branch,
            });
        }
        Ok(question)
    }

    /// Check the ids and shapes the engine and synthesizer rely on.
    pub fn validate_contract(&self) -> Result<(), CatalogError> {
        let gating = self.require(GATING_ID, QuestionKind::SingleSelect, QuestionBranch::Always)?;
        if gating.options.len() != 2 {
            return Err(CatalogError::ValidationFailed(format!(
                "gating question '{GATING_ID}' needs exactly two options"
            )));
        }
        let gating_index = self.positions[GATING_ID];

        self.require(DIRECT_ENTRY_ID, QuestionKind::FreeText, QuestionBranch::TypeKnown)?;
        if self.positions[DIRECT_ENTRY_ID] < gating_index {
            return Err(CatalogError::OutOfOrder(DIRECT_ENTRY_ID.to_string()));
        }

        for dimension in MbtiDimension::ALL {
            let id = dimension.question_id();
            let question = self.require(id, QuestionKind::SingleSelect, QuestionBranch::TypeUnknown)?;
            if self.positions[id] < gating_index {
                return Err(CatalogError::OutOfOrder(id.to_string()));
            }
            if let Some(option) = question
                .options
                .iter()
                .find(|o| dimension.resolve_letter(o).is_none())
            {
                return Err(CatalogError::ValidationFailed(format!(
                    "option '{option}' of '{id}' does not start with one of {:?}",
                    dimension.letters()
                )));
            }
        }

        // The rating is the score, so it must be on the score scale.
        for dimension in PermaDimension::ALL {
            let id = dimension.question_id();
            let slider = self.require(id, QuestionKind::Slider, QuestionBranch::Always)?;
            if !slider
                .range
                .is_some_and(|r| r.min >= MIN_SCORE && r.max <= MAX_SCORE)
            {
                return Err(CatalogError::InvalidRange(id.to_string()));
            }
        }

        Ok(())
    }

    /// The catalog shipped with the engine.
    pub fn builtin() -> Self {
        let mut questions = vec![
            Question::free_text(NAME_ID, "Hi! I'm glad you're here. What should I call you?"),
            Question::single_select(
                GATING_ID,
                "Do you already know your MBTI personality type?",
                &[KNOWS_TYPE_OPTION, UNSURE_OPTION],
            ),
            Question::free_text(
                DIRECT_ENTRY_ID,
                "Great! What's your four-letter type? (for example INFJ or ESTP)",
            )
            .with_branch(QuestionBranch::TypeKnown),
            Question::single_select(
                "mbti_ei",
                "After a long week, what recharges you more?",
                &["E - Time out with other people", "I - Quiet time on my own"],
            )
            .with_branch(QuestionBranch::TypeUnknown),
            Question::single_select(
                "mbti_sn",
                "When you take in something new, what do you trust more?",
                &["S - Concrete facts and details", "N - Patterns and possibilities"],
            )
            .with_branch(QuestionBranch::TypeUnknown),
            Question::single_select(
                "mbti_tf",
                "When a decision gets tough, what usually leads?",
                &["T - Logic and consistency", "F - Values and how people are affected"],
            )
            .with_branch(QuestionBranch::TypeUnknown),
            Question::single_select(
                "mbti_jp",
                "How do you like to approach your plans?",
                &["J - Settled and organized", "P - Open and spontaneous"],
            )
            .with_branch(QuestionBranch::TypeUnknown),
        ];

        let perma = [
            (
                PermaDimension::PositiveEmotion,
                "How often have you felt joyful, content or grateful lately? (0-10)",
                "What's something that made you happy recently?",
            ),
            (
                PermaDimension::Engagement,
                "How often do you get so absorbed in something that you lose track of time? (0-10)",
                "When did you last lose yourself in an activity?",
            ),
            (
                PermaDimension::Relationships,
                "How supported and connected do you feel by the people around you? (0-10)",
                "Who is someone you feel close to, and what do you enjoy doing together?",
            ),
            (
                PermaDimension::Meaning,
                "How much does your life feel purposeful and worthwhile? (0-10)",
                "What gives you a sense of purpose right now?",
            ),
            (
                PermaDimension::Accomplishment,
                "How much progress are you making toward goals that matter to you? (0-10)",
                "What's an achievement, big or small, you're proud of lately?",
            ),
        ];
        for (dimension, rating, note) in perma {
            questions.push(Question::slider(dimension.question_id(), rating, 0.0, 10.0));
            questions.push(Question::free_text(dimension.note_question_id(), note));
        }

        questions.push(Question::multi_select(
            INTERESTS_ID,
            "Which of these interest you? Pick as many as you like.",
            &[
                "Mindfulness & meditation",
                "Fitness & movement",
                "Creative arts",
                "Reading & learning",
                "Nature & outdoors",
                "Music",
                "Cooking & food",
                "Travel",
                "Technology",
                "Volunteering",
            ],
        ));
        questions.push(Question::single_select(
            COMMUNICATION_STYLE_ID,
            "How would you like me to talk with you?",
            &[
                "Warm and encouraging",
                "Direct and to the point",
                "Playful and light-hearted",
                "Thoughtful and reflective",
            ],
        ));
        questions.push(Question::single_select(
            PRIMARY_GOAL_ID,
            "What would you most like support with right now?",
            &[
                "Feeling happier day to day",
                "Managing stress",
                "Building better habits",
                "Strengthening relationships",
                "Finding more purpose",
                "Reaching a personal goal",
            ],
        ));

        Self::indexed(Self::VERSION.to_string(), questions)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
