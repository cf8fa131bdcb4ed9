//! Responses collected during an assessment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The value attached to one question.
///
/// Free-text answers use `Single`, the same as single-select answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Response {
    /// One string: a selected option or verbatim text
    Single(String),
    /// Ordered, duplicate-free set of selected options
    Multi(Vec<String>),
    /// Numeric slider rating
    Slider(f64),
}

impl Response {
    /// Short name of the variant for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Multi(_) => "multi",
            Self::Slider(_) => "slider",
        }
    }

    /// Empty submissions are no-ops rather than answers.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.trim().is_empty(),
            Self::Multi(values) => values.is_empty(),
            Self::Slider(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Multi(values) => Some(values),
            _ => None,
        }
    }

    /// Numeric reading; a numeric string counts as a slider-as-string.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Self::Slider(value) => Some(*value),
            Self::Single(value) => value.trim().parse::<f64>().ok(),
            Self::Multi(_) => None,
        };
        number.filter(|value| value.is_finite())
    }
}

/// Answers keyed by question id.
///
/// Backed by an ordered map so serialized output is deterministic. A later
/// answer to the same id replaces the former.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses(BTreeMap<String, Response>);

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the one it replaced.
    pub fn insert(&mut self, question_id: impl Into<String>, response: Response) -> Option<Response> {
        self.0.insert(question_id.into(), response)
    }

    pub fn remove(&mut self, question_id: &str) -> Option<Response> {
        self.0.remove(question_id)
    }

    pub fn get(&self, question_id: &str) -> Option<&Response> {
        self.0.get(question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Response)> {
        self.0.iter()
    }

    /// Text of a single/free-text answer.
    pub fn text(&self, question_id: &str) -> Option<&str> {
        self.get(question_id).and_then(Response::as_text)
    }

    /// Numeric value of a slider answer.
    pub fn number(&self, question_id: &str) -> Option<f64> {
        self.get(question_id).and_then(Response::as_number)
    }
}

impl FromIterator<(String, Response)> for Responses {
    fn from_iter<I: IntoIterator<Item = (String, Response)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_serde_shape() {
        let json = serde_json::to_string(&Response::Slider(4.0)).unwrap();
        assert_eq!(json, r#"{"kind":"slider","value":4.0}"#);

        let parsed: Response =
            serde_json::from_str(r#"{"kind":"multi","value":["Music","Art"]}"#).unwrap();
        assert_eq!(parsed, Response::Multi(vec!["Music".into(), "Art".into()]));
    }

    #[test]
    fn test_empty_responses() {
        assert!(Response::Single("   ".into()).is_empty());
        assert!(Response::Multi(vec![]).is_empty());
        assert!(!Response::Slider(0.0).is_empty());
        assert!(!Response::Single("E".into()).is_empty());
    }

    #[test]
    fn test_as_number_accepts_numeric_strings() {
        assert_eq!(Response::Slider(6.0).as_number(), Some(6.0));
        assert_eq!(Response::Single(" 8 ".into()).as_number(), Some(8.0));
        assert_eq!(Response::Single("eight".into()).as_number(), None);
        assert_eq!(Response::Slider(f64::INFINITY).as_number(), None);
    }

    #[test]
    fn test_later_answer_overwrites() {
        let mut responses = Responses::new();
        responses.insert("name", Response::Single("Ada".into()));
        let previous = responses.insert("name", Response::Single("Grace".into()));
        assert_eq!(previous, Some(Response::Single("Ada".into())));
        assert_eq!(responses.text("name"), Some("Grace"));
        assert_eq!(responses.len(), 1);
    }

    #[test]
    fn test_serialization_is_key_ordered() {
        let mut a = Responses::new();
        a.insert("b", Response::Slider(1.0));
        a.insert("a", Response::Slider(2.0));
        let mut b = Responses::new();
        b.insert("a", Response::Slider(2.0));
        b.insert("b", Response::Slider(1.0));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
