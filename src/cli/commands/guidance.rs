//! PERMA guidance for ad-hoc scores.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::display::{output, score_bar, CommandOutput, DetailView};
use crate::domain::models::mbti;
use crate::domain::models::{Config, MbtiType, PermaDimension, PermaScores, SubAnswers};
use crate::services::{GuidanceEntry, GuidanceGenerator};

#[derive(Args, Debug)]
pub struct GuidanceArgs {
    /// Five 0-10 scores: positive emotion, engagement, relationships,
    /// meaning, accomplishment
    #[arg(short, long, value_delimiter = ',', num_args = 5, required = true)]
    pub scores: Vec<f64>,

    /// Four-letter type code, enabling the type's growth affinity
    #[arg(short = 't', long = "type")]
    pub mbti_type: Option<String>,

    /// Detail for a dimension, quoted back in guidance (format: "dimension=text")
    #[arg(short, long)]
    pub note: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GuidanceOutput {
    pub scores: PermaScores,
    pub mbti_type: Option<MbtiType>,
    pub entries: Vec<GuidanceEntry>,
    pub strengths: Vec<PermaDimension>,
    pub narrative: String,
}

impl CommandOutput for GuidanceOutput {
    fn to_human(&self) -> String {
        let mut view = DetailView::new("Wellbeing guidance");
        if let Some(mbti_type) = &self.mbti_type {
            view = view.field("Type", &mbti_type.to_string());
        }
        for (dimension, score) in self.scores.iter() {
            view = view.field(dimension.label(), &score_bar(score));
        }
        format!("{}\n\n{}", view.render(), self.narrative)
    }
}

/// Parse repeated `dimension=text` notes.
pub fn parse_notes(notes: &[String]) -> Result<SubAnswers> {
    notes
        .iter()
        .map(|note| {
            let (name, text) = note
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Invalid note '{note}': expected dimension=text"))?;
            let dimension = PermaDimension::from_str(name.trim())
                .ok_or_else(|| anyhow::anyhow!("Unknown PERMA dimension: {name}"))?;
            Ok((dimension, text.trim().to_string()))
        })
        .collect()
}

pub async fn execute(args: GuidanceArgs, config: &Config, json_mode: bool) -> Result<()> {
    let values: [f64; 5] = args
        .scores
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("Expected exactly five scores"))?;
    if let Some(bad) = values.iter().find(|v| !(0.0..=10.0).contains(*v)) {
        anyhow::bail!("Scores must be between 0 and 10, got {bad}");
    }
    let scores = PermaScores::new(values);

    let mbti_type = match &args.mbti_type {
        Some(code) => {
            let validation = mbti::validate(code);
            let parsed = MbtiType::from_code(&validation.normalized)
                .ok_or_else(|| anyhow::anyhow!("Not a recognized type code: {code}"))?;
            Some(parsed)
        }
        None => None,
    };
    let notes = parse_notes(&args.note)?;

    let generator = GuidanceGenerator::new(config.guidance.clone());
    let out = GuidanceOutput {
        entries: generator.plan(&scores, mbti_type.as_ref(), Some(&notes)),
        narrative: generator.generate(&scores, mbti_type.as_ref(), Some(&notes)),
        strengths: scores.strengths(config.guidance.strength_threshold),
        scores,
        mbti_type,
    };
    output(&out, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notes() {
        let notes = parse_notes(&[
            "engagement= painting ".to_string(),
            "positive-emotion=a walk".to_string(),
        ])
        .unwrap();
        assert_eq!(notes.get(&PermaDimension::Engagement).map(String::as_str), Some("painting"));
        assert_eq!(
            notes.get(&PermaDimension::PositiveEmotion).map(String::as_str),
            Some("a walk")
        );
    }

    #[test]
    fn test_parse_notes_rejects_garbage() {
        assert!(parse_notes(&["painting".to_string()]).is_err());
        assert!(parse_notes(&["joy=painting".to_string()]).is_err());
    }
}
