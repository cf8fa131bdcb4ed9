//! PERMA wellbeing dimensions and scores.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest possible dimension score.
pub const MIN_SCORE: f64 = 0.0;
/// Highest possible dimension score.
pub const MAX_SCORE: f64 = 10.0;

/// One of the five PERMA dimensions.
///
/// Declaration order is the guidance priority order and the tie-break for
/// every "pick first N" step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermaDimension {
    PositiveEmotion,
    Engagement,
    Relationships,
    Meaning,
    Accomplishment,
}

impl PermaDimension {
    /// All dimensions in priority order.
    pub const ALL: [Self; 5] = [
        Self::PositiveEmotion,
        Self::Engagement,
        Self::Relationships,
        Self::Meaning,
        Self::Accomplishment,
    ];

    /// Catalog id of the slider rating this dimension.
    pub fn question_id(&self) -> &'static str {
        match self {
            Self::PositiveEmotion => "perma_positiveEmotion",
            Self::Engagement => "perma_engagement",
            Self::Relationships => "perma_relationships",
            Self::Meaning => "perma_meaning",
            Self::Accomplishment => "perma_accomplishment",
        }
    }

    /// Catalog id of the free-text detail captured after the rating.
    pub fn note_question_id(&self) -> &'static str {
        match self {
            Self::PositiveEmotion => "perma_positiveEmotion_note",
            Self::Engagement => "perma_engagement_note",
            Self::Relationships => "perma_relationships_note",
            Self::Meaning => "perma_meaning_note",
            Self::Accomplishment => "perma_accomplishment_note",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PositiveEmotion => "Positive Emotion",
            Self::Engagement => "Engagement",
            Self::Relationships => "Relationships",
            Self::Meaning => "Meaning",
            Self::Accomplishment => "Accomplishment",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "positive_emotion" | "positiveemotion" | "p" => Some(Self::PositiveEmotion),
            "engagement" | "e" => Some(Self::Engagement),
            "relationships" | "r" => Some(Self::Relationships),
            "meaning" | "m" => Some(Self::Meaning),
            "accomplishment" | "a" => Some(Self::Accomplishment),
            _ => None,
        }
    }
}

impl fmt::Display for PermaDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Self-reported 0-10 rating per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PermaScores {
    pub positive_emotion: f64,
    pub engagement: f64,
    pub relationships: f64,
    pub meaning: f64,
    pub accomplishment: f64,
}

impl PermaScores {
    /// Build from scores listed in priority order.
    pub fn new(scores: [f64; 5]) -> Self {
        let [positive_emotion, engagement, relationships, meaning, accomplishment] =
            scores.map(|s| s.clamp(MIN_SCORE, MAX_SCORE));
        Self {
            positive_emotion,
            engagement,
            relationships,
            meaning,
            accomplishment,
        }
    }

    pub fn get(&self, dimension: PermaDimension) -> f64 {
        match dimension {
            PermaDimension::PositiveEmotion => self.positive_emotion,
            PermaDimension::Engagement => self.engagement,
            PermaDimension::Relationships => self.relationships,
            PermaDimension::Meaning => self.meaning,
            PermaDimension::Accomplishment => self.accomplishment,
        }
    }

    /// Dimension/score pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (PermaDimension, f64)> + '_ {
        PermaDimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Dimensions scoring below `threshold`, in priority order.
    pub fn focus_areas(&self, threshold: f64) -> Vec<PermaDimension> {
        self.iter()
            .filter(|(_, score)| *score < threshold)
            .map(|(d, _)| d)
            .collect()
    }

    /// Dimensions scoring at or above `threshold`, in priority order.
    pub fn strengths(&self, threshold: f64) -> Vec<PermaDimension> {
        self.iter()
            .filter(|(_, score)| *score >= threshold)
            .map(|(d, _)| d)
            .collect()
    }

    pub fn average(&self) -> f64 {
        self.iter().map(|(_, s)| s).sum::<f64>() / PermaDimension::ALL.len() as f64
    }
}

/// Free-text detail per dimension ("what made you happy recently").
pub type SubAnswers = BTreeMap<PermaDimension, String>;

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> PermaScores {
        PermaScores::new([9.0, 4.0, 8.0, 5.0, 9.0])
    }

    #[test]
    fn test_focus_areas_in_priority_order() {
        assert_eq!(
            scores().focus_areas(7.0),
            vec![PermaDimension::Engagement, PermaDimension::Meaning]
        );
    }

    #[test]
    fn test_strengths_inclusive_threshold() {
        assert_eq!(
            scores().strengths(8.0),
            vec![
                PermaDimension::PositiveEmotion,
                PermaDimension::Relationships,
                PermaDimension::Accomplishment
            ]
        );
    }

    #[test]
    fn test_new_clamps_to_scale() {
        let s = PermaScores::new([-1.0, 11.0, 5.0, 5.0, 5.0]);
        assert_eq!(s.positive_emotion, 0.0);
        assert_eq!(s.engagement, 10.0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            PermaDimension::from_str("positive-emotion"),
            Some(PermaDimension::PositiveEmotion)
        );
        assert_eq!(PermaDimension::from_str("Meaning"), Some(PermaDimension::Meaning));
        assert_eq!(PermaDimension::from_str("joy"), None);
    }

    #[test]
    fn test_average() {
        assert!((scores().average() - 7.0).abs() < f64::EPSILON);
    }
}
