//! Profile domain model.
//!
//! A profile is created once, when the last question is answered, and is
//! never mutated afterwards. A retake produces a new profile.

use serde::{Deserialize, Serialize};

use super::config::GuidanceSettings;
use super::mbti::MbtiType;
use super::perma::{PermaDimension, PermaScores, SubAnswers};

/// Synthesized personality and wellbeing profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// What the user asked to be called
    pub name: String,
    /// Four-letter type code
    pub mbti_type: MbtiType,
    /// Self-reported PERMA ratings
    pub perma_scores: PermaScores,
    /// Normalized interests, full list
    pub interests: Vec<String>,
    /// Preferred conversation tone
    pub communication_style: String,
    /// What the user most wants support with
    pub primary_goal: String,
    /// Free-text detail per PERMA dimension
    #[serde(default, skip_serializing_if = "SubAnswers::is_empty")]
    pub sub_answers: SubAnswers,
}

impl Profile {
    /// Interests capped for display. The profile keeps the full list.
    pub fn display_interests(&self, limit: usize) -> &[String] {
        &self.interests[..self.interests.len().min(limit)]
    }

    /// View consumed by wellness features.
    pub fn wellness_config(&self, settings: &GuidanceSettings) -> WellnessConfig {
        WellnessConfig {
            mbti_type: self.mbti_type,
            perma_scores: self.perma_scores,
            focus_areas: self.perma_scores.focus_areas(settings.focus_threshold),
            strengths: self.perma_scores.strengths(settings.strength_threshold),
        }
    }

    /// View consumed by content recommendation.
    pub fn content_config(&self) -> ContentConfig {
        ContentConfig {
            interests: self.interests.clone(),
            communication_style: self.communication_style.clone(),
            primary_goal: self.primary_goal.clone(),
        }
    }
}

/// Wellness-facing field selection over a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellnessConfig {
    pub mbti_type: MbtiType,
    pub perma_scores: PermaScores,
    pub focus_areas: Vec<PermaDimension>,
    pub strengths: Vec<PermaDimension>,
}

/// Content-facing field selection over a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentConfig {
    pub interests: Vec<String>,
    pub communication_style: String,
    pub primary_goal: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            name: "Sam".into(),
            mbti_type: MbtiType::from_code("ENFP").unwrap(),
            perma_scores: PermaScores::new([9.0, 4.0, 8.0, 5.0, 9.0]),
            interests: vec!["Music".into(), "Travel".into(), "Technology".into()],
            communication_style: "Warm and encouraging".into(),
            primary_goal: "Finding more purpose".into(),
            sub_answers: SubAnswers::new(),
        }
    }

    #[test]
    fn test_display_interests_caps_without_dropping() {
        let p = profile();
        assert_eq!(p.display_interests(2), &["Music".to_string(), "Travel".to_string()]);
        assert_eq!(p.display_interests(10).len(), 3);
        assert_eq!(p.interests.len(), 3);
    }

    #[test]
    fn test_wellness_config() {
        let config = profile().wellness_config(&GuidanceSettings::default());
        assert_eq!(
            config.focus_areas,
            vec![PermaDimension::Engagement, PermaDimension::Meaning]
        );
        assert_eq!(config.strengths.len(), 3);
        assert_eq!(config.mbti_type.to_string(), "ENFP");
    }

    #[test]
    fn test_content_config() {
        let config = profile().content_config();
        assert_eq!(config.interests.len(), 3);
        assert_eq!(config.communication_style, "Warm and encouraging");
    }

    #[test]
    fn test_profile_json_shape() {
        let json = serde_json::to_value(profile()).unwrap();
        assert_eq!(json["mbti_type"], "ENFP");
        assert_eq!(json["perma_scores"]["engagement"], 4.0);
        assert!(json.get("sub_answers").is_none());
    }
}
