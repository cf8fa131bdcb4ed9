//! Question domain model.
//!
//! A question is one turn of the assessment chat. Its kind decides which
//! `Response` shape it accepts; its branch decides when forward traversal
//! visits it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{AssessmentError, DomainResult};

use super::response::Response;

/// Input kind of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Exactly one of the declared options
    SingleSelect,
    /// One or more of the declared options
    MultiSelect,
    /// A number within the declared range
    Slider,
    /// Verbatim text
    FreeText,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleSelect => "single_select",
            Self::MultiSelect => "multi_select",
            Self::Slider => "slider",
            Self::FreeText => "free_text",
        }
    }

    /// Whether the question carries an option list.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::SingleSelect | Self::MultiSelect)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive numeric range of a slider question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// A range is usable when both ends are finite and ordered.
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// When forward traversal visits a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionBranch {
    /// Visited on every path
    #[default]
    Always,
    /// Visited only when the user says they know their type
    TypeKnown,
    /// Visited only when the type has to be worked out dimension by dimension
    TypeUnknown,
}

impl QuestionBranch {
    /// Whether a question on this branch is eligible given the branch flag.
    pub fn is_eligible(&self, knows_own_type: bool) -> bool {
        match self {
            Self::Always => true,
            Self::TypeKnown => knows_own_type,
            Self::TypeUnknown => !knows_own_type,
        }
    }
}

/// A single question of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, unique within a catalog
    pub id: String,
    /// Text shown to the user
    pub prompt: String,
    /// Input kind
    pub kind: QuestionKind,
    /// Ordered option list for select kinds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Range for sliders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SliderRange>,
    /// Branch eligibility
    #[serde(default)]
    pub branch: QuestionBranch,
}

impl Question {
    fn base(id: &str, prompt: &str, kind: QuestionKind) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind,
            options: Vec::new(),
            range: None,
            branch: QuestionBranch::Always,
        }
    }

    /// Create a single-select question.
    pub fn single_select(id: &str, prompt: &str, options: &[&str]) -> Self {
        let mut question = Self::base(id, prompt, QuestionKind::SingleSelect);
        question.options = options.iter().map(|o| (*o).to_string()).collect();
        question
    }

    /// Create a multi-select question.
    pub fn multi_select(id: &str, prompt: &str, options: &[&str]) -> Self {
        let mut question = Self::base(id, prompt, QuestionKind::MultiSelect);
        question.options = options.iter().map(|o| (*o).to_string()).collect();
        question
    }

    /// Create a slider question.
    pub fn slider(id: &str, prompt: &str, min: f64, max: f64) -> Self {
        let mut question = Self::base(id, prompt, QuestionKind::Slider);
        question.range = Some(SliderRange::new(min, max));
        question
    }

    /// Create a free-text question.
    pub fn free_text(id: &str, prompt: &str) -> Self {
        Self::base(id, prompt, QuestionKind::FreeText)
    }

    /// Set the branch.
    pub fn with_branch(mut self, branch: QuestionBranch) -> Self {
        self.branch = branch;
        self
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }

    /// Check that a response has the shape this question declares.
    ///
    /// Only structure is checked: the variant, option membership, and slider
    /// range. Sliders also take numeric text. Emptiness is the caller's concern (empty submissions are no-ops
    /// in the state machine).
    pub fn check_shape(&self, response: &Response) -> DomainResult<()> {
        let malformed = |reason: String| AssessmentError::malformed(&self.id, self.kind, reason);

        match (self.kind, response) {
            (QuestionKind::SingleSelect, Response::Single(value)) => {
                if self.has_option(value) {
                    Ok(())
                } else {
                    Err(malformed(format!("'{value}' is not one of the options")))
                }
            }
            (QuestionKind::MultiSelect, Response::Multi(values)) => {
                match values.iter().find(|v| !self.has_option(v)) {
                    Some(unknown) => Err(malformed(format!("'{unknown}' is not one of the options"))),
                    None => Ok(()),
                }
            }
            (QuestionKind::Slider, Response::Slider(_) | Response::Single(_)) => {
                let range = self
                    .range
                    .ok_or_else(|| malformed("slider has no declared range".to_string()))?;
                // Numeric text is a slider value written as a string.
                let value = response
                    .as_number()
                    .ok_or_else(|| malformed("expected a number".to_string()))?;
                if range.contains(value) {
                    Ok(())
                } else {
                    Err(malformed(format!(
                        "{value} is outside [{}, {}]",
                        range.min, range.max
                    )))
                }
            }
            (QuestionKind::FreeText, Response::Single(_)) => Ok(()),
            (_, other) => Err(malformed(format!("got a {} response", other.kind_name()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_eligibility() {
        assert!(QuestionBranch::Always.is_eligible(true));
        assert!(QuestionBranch::Always.is_eligible(false));
        assert!(QuestionBranch::TypeKnown.is_eligible(true));
        assert!(!QuestionBranch::TypeKnown.is_eligible(false));
        assert!(!QuestionBranch::TypeUnknown.is_eligible(true));
        assert!(QuestionBranch::TypeUnknown.is_eligible(false));
    }

    #[test]
    fn test_single_select_shape() {
        let q = Question::single_select("style", "How?", &["Direct", "Gentle"]);
        assert!(q.check_shape(&Response::Single("Direct".into())).is_ok());
        assert!(q.check_shape(&Response::Single("Loud".into())).is_err());
        assert!(q.check_shape(&Response::Slider(3.0)).is_err());
    }

    #[test]
    fn test_multi_select_shape() {
        let q = Question::multi_select("interests", "What?", &["Music", "Art"]);
        assert!(q
            .check_shape(&Response::Multi(vec!["Music".into(), "Art".into()]))
            .is_ok());
        let err = q
            .check_shape(&Response::Multi(vec!["Music".into(), "Chess".into()]))
            .unwrap_err();
        assert!(err.to_string().contains("Chess"));
        assert!(q.check_shape(&Response::Single("Music".into())).is_err());
    }

    #[test]
    fn test_slider_shape() {
        let q = Question::slider("perma_meaning", "Meaning?", 0.0, 10.0);
        assert!(q.check_shape(&Response::Slider(0.0)).is_ok());
        assert!(q.check_shape(&Response::Slider(10.0)).is_ok());
        assert!(q.check_shape(&Response::Slider(10.5)).is_err());
        assert!(q.check_shape(&Response::Slider(f64::NAN)).is_err());
        assert!(q.check_shape(&Response::Multi(vec!["7".into()])).is_err());
    }

    #[test]
    fn test_slider_accepts_numeric_text() {
        let q = Question::slider("perma_meaning", "Meaning?", 0.0, 10.0);
        assert!(q.check_shape(&Response::Single(" 7 ".into())).is_ok());
        assert!(q.check_shape(&Response::Single("7.5".into())).is_ok());
        assert!(q.check_shape(&Response::Single("15".into())).is_err());
        let err = q.check_shape(&Response::Single("lots".into())).unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn test_free_text_accepts_single_only() {
        let q = Question::free_text("name", "Name?");
        assert!(q.check_shape(&Response::Single("Ada".into())).is_ok());
        assert!(q.check_shape(&Response::Multi(vec!["Ada".into()])).is_err());
    }

    #[test]
    fn test_question_serde_defaults() {
        let yaml = "id: name\nprompt: What should I call you?\nkind: free_text\n";
        let q: Question = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(q.kind, QuestionKind::FreeText);
        assert_eq!(q.branch, QuestionBranch::Always);
        assert!(q.options.is_empty());
        assert!(q.range.is_none());
    }
}
