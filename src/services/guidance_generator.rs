//! PERMA guidance narrative.
//!
//! Low-scoring dimensions become guidance entries in priority order. A type's
//! growth affinity, when low, jumps the queue. Strengths are never emitted
//! here; callers get them from [`PermaScores::strengths`].

use serde::Serialize;
use tracing::debug;

use crate::domain::models::{GuidanceSettings, MbtiType, PermaDimension, PermaScores, SubAnswers};

/// Message used when no dimension is below the focus threshold.
pub const AFFIRMATION: &str = "Your wellbeing looks well balanced across all five areas right now. \
Keep doing what's working, and check in with yourself whenever things shift.";

/// One paragraph of the narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidanceEntry {
    pub dimension: PermaDimension,
    pub score: f64,
    pub message: String,
    /// Promoted by the type's growth affinity
    pub from_affinity: bool,
}

/// The dimension a type tends to grow through.
pub fn affinity(mbti_type: &MbtiType) -> Option<PermaDimension> {
    let code = mbti_type.code()?;
    let dimension = match code.as_str() {
        "INTJ" | "ISTJ" | "ISTP" => PermaDimension::Relationships,
        "INTP" | "ENTP" | "INFP" | "ESFJ" => PermaDimension::Accomplishment,
        "ENTJ" | "INFJ" | "ISFJ" => PermaDimension::PositiveEmotion,
        "ENFJ" | "ESTJ" | "ISFP" | "ESTP" => PermaDimension::Meaning,
        "ENFP" | "ESFP" => PermaDimension::Engagement,
        _ => return None,
    };
    Some(dimension)
}

/// Builds the guidance narrative from PERMA scores.
#[derive(Debug, Clone, Default)]
pub struct GuidanceGenerator {
    settings: GuidanceSettings,
}

impl GuidanceGenerator {
    pub fn new(settings: GuidanceSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GuidanceSettings {
        &self.settings
    }

    /// Ordered guidance entries; empty when nothing is below the focus
    /// threshold. At most `max_additional_entries` follow the optional
    /// affinity entry.
    pub fn plan(
        &self,
        scores: &PermaScores,
        mbti_type: Option<&MbtiType>,
        sub_answers: Option<&SubAnswers>,
    ) -> Vec<GuidanceEntry> {
        let mut low = scores.focus_areas(self.settings.focus_threshold);
        let mut entries = Vec::with_capacity(low.len().min(self.settings.max_additional_entries + 1));

        let preferred = mbti_type.and_then(affinity);
        if let Some(pos) = preferred.and_then(|d| low.iter().position(|l| *l == d)) {
            let dimension = low.remove(pos);
            entries.push(self.entry(dimension, scores, sub_answers, true));
        }

        // The affinity entry does not count against the cap.
        entries.extend(
            low.into_iter()
                .take(self.settings.max_additional_entries)
                .map(|dimension| self.entry(dimension, scores, sub_answers, false)),
        );

        debug!(
            entries = entries.len(),
            affinity = ?preferred,
            "guidance planned"
        );
        entries
    }

    /// The narrative: entries joined by blank lines, or the affirmation.
    pub fn generate(
        &self,
        scores: &PermaScores,
        mbti_type: Option<&MbtiType>,
        sub_answers: Option<&SubAnswers>,
    ) -> String {
        let entries = self.plan(scores, mbti_type, sub_answers);
        if entries.is_empty() {
            return AFFIRMATION.to_string();
        }
        entries
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn entry(
        &self,
        dimension: PermaDimension,
        scores: &PermaScores,
        sub_answers: Option<&SubAnswers>,
        from_affinity: bool,
    ) -> GuidanceEntry {
        let note = sub_answers
            .and_then(|answers| answers.get(&dimension))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty());
        let mut message = match note {
            Some(note) => format!("{} You mentioned \"{note}\". {}", lead(dimension), follow_up(dimension)),
            None => format!("{} {}", lead(dimension), suggestion(dimension)),
        };
        if from_affinity {
            message.push_str(" This tends to be an especially rewarding area for your type.");
        }
        GuidanceEntry {
            dimension,
            score: scores.get(dimension),
            message,
            from_affinity,
        }
    }
}

fn lead(dimension: PermaDimension) -> &'static str {
    match dimension {
        PermaDimension::PositiveEmotion => "Positive Emotion: there's room for more everyday joy.",
        PermaDimension::Engagement => "Engagement: you could use more moments of real absorption.",
        PermaDimension::Relationships => "Relationships: connection could use some attention.",
        PermaDimension::Meaning => "Meaning: a stronger sense of purpose could help.",
        PermaDimension::Accomplishment => "Accomplishment: progress has felt slow lately.",
    }
}

fn suggestion(dimension: PermaDimension) -> &'static str {
    match dimension {
        PermaDimension::PositiveEmotion => {
            "Try noting three good things at the end of each day, however small."
        }
        PermaDimension::Engagement => {
            "Set aside a regular block for an activity that stretches your skills without rushing it."
        }
        PermaDimension::Relationships => {
            "Reach out to one person this week just to catch up, with no agenda."
        }
        PermaDimension::Meaning => {
            "Spend a few minutes writing about what matters most to you and one small way to act on it."
        }
        PermaDimension::Accomplishment => {
            "Pick one goal and break it into a step you can finish in under an hour."
        }
    }
}

fn follow_up(dimension: PermaDimension) -> &'static str {
    match dimension {
        PermaDimension::PositiveEmotion => "Making room for more moments like that could lift your week.",
        PermaDimension::Engagement => "Finding regular time for that kind of focus is a great place to start.",
        PermaDimension::Relationships => "Investing a little more time there could strengthen that bond.",
        PermaDimension::Meaning => "Letting that guide a small decision each day can deepen your sense of purpose.",
        PermaDimension::Accomplishment => "Building on that with one small, concrete next step can restore momentum.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> PermaScores {
        PermaScores::new([9.0, 4.0, 8.0, 5.0, 9.0])
    }

    #[test]
    fn test_all_high_scores_affirm_only() {
        let generator = GuidanceGenerator::default();
        let all_high = PermaScores::new([7.0, 8.0, 9.0, 10.0, 7.0]);
        assert!(generator.plan(&all_high, None, None).is_empty());
        assert_eq!(generator.generate(&all_high, None, None), AFFIRMATION);
    }

    #[test]
    fn test_enfp_scenario_engagement_then_meaning() {
        let generator = GuidanceGenerator::default();
        let entries = generator.plan(&scores(), None, None);
        let dims: Vec<_> = entries.iter().map(|e| e.dimension).collect();
        assert_eq!(dims, vec![PermaDimension::Engagement, PermaDimension::Meaning]);

        let narrative = generator.generate(&scores(), None, None);
        let parts: Vec<&str> = narrative.split("\n\n").collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].starts_with("Engagement"));
        assert!(parts[1].starts_with("Meaning"));
    }

    #[test]
    fn test_affinity_promotes_low_dimension() {
        let generator = GuidanceGenerator::default();
        // ISFP grows through meaning.
        let isfp = MbtiType::from_code("ISFP").unwrap();
        let entries = generator.plan(&scores(), Some(&isfp), None);
        assert_eq!(entries[0].dimension, PermaDimension::Meaning);
        assert!(entries[0].from_affinity);
        assert_eq!(entries[1].dimension, PermaDimension::Engagement);
        assert!(!entries[1].from_affinity);
    }

    #[test]
    fn test_affinity_ignored_when_not_low() {
        let generator = GuidanceGenerator::default();
        // INTJ grows through relationships, which scored 8.
        let intj = MbtiType::from_code("INTJ").unwrap();
        let entries = generator.plan(&scores(), Some(&intj), None);
        assert!(entries.iter().all(|e| !e.from_affinity));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_caps_entries_without_affinity() {
        let generator = GuidanceGenerator::default();
        let all_low = PermaScores::new([1.0, 2.0, 3.0, 4.0, 5.0]);
        let dims: Vec<_> = generator
            .plan(&all_low, None, None)
            .into_iter()
            .map(|e| e.dimension)
            .collect();
        assert_eq!(dims, vec![PermaDimension::PositiveEmotion, PermaDimension::Engagement]);

        // A type whose affinity is not low adds nothing beyond the cap.
        let entries = generator.plan(
            &PermaScores::new([1.0, 2.0, 3.0, 4.0, 9.0]),
            Some(&MbtiType::from_code("INFP").unwrap()),
            None,
        );
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| !e.from_affinity));
    }

    #[test]
    fn test_affinity_entry_plus_two_more() {
        let generator = GuidanceGenerator::default();
        let all_low = PermaScores::new([1.0, 2.0, 3.0, 4.0, 5.0]);
        let infp = MbtiType::from_code("INFP").unwrap();
        let dims: Vec<_> = generator
            .plan(&all_low, Some(&infp), None)
            .into_iter()
            .map(|e| e.dimension)
            .collect();
        assert_eq!(
            dims,
            vec![
                PermaDimension::Accomplishment,
                PermaDimension::PositiveEmotion,
                PermaDimension::Engagement
            ]
        );
    }

    #[test]
    fn test_sub_answer_is_quoted() {
        let generator = GuidanceGenerator::default();
        let mut notes = SubAnswers::new();
        notes.insert(PermaDimension::Engagement, "painting on weekends".into());
        let narrative = generator.generate(&scores(), None, Some(&notes));
        assert!(narrative.contains("\"painting on weekends\""));
    }

    #[test]
    fn test_every_type_has_affinity() {
        for code in crate::domain::models::mbti::MBTI_CODES {
            let mbti_type = MbtiType::from_code(code).unwrap();
            assert!(affinity(&mbti_type).is_some(), "{code} has no affinity");
        }
        let partial = MbtiType::from_letters([Some('E'), None, Some('F'), Some('P')]);
        assert!(affinity(&partial).is_none());
    }

    #[test]
    fn test_custom_threshold() {
        let generator = GuidanceGenerator::new(GuidanceSettings {
            focus_threshold: 9.0,
            max_additional_entries: 3,
            ..GuidanceSettings::default()
        });
        let dims: Vec<_> = generator
            .plan(&scores(), None, None)
            .into_iter()
            .map(|e| e.dimension)
            .collect();
        assert_eq!(
            dims,
            vec![
                PermaDimension::Engagement,
                PermaDimension::Relationships,
                PermaDimension::Meaning
            ]
        );
    }
}
