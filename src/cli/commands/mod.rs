//! CLI command implementations.

pub mod catalog;
pub mod guidance;
pub mod replay;
pub mod score;
pub mod take;
pub mod validate_type;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cli::display::{score_bar, CommandOutput, DetailView};
use crate::domain::models::{
    Config, PermaDimension, Profile, Question, QuestionKind, Response,
};
use crate::infrastructure::CatalogLoader;
use crate::services::{AssessmentEngine, GuidanceEntry};

/// Build an engine over the configured catalog, or `catalog` when given.
pub async fn load_engine(config: &Config, catalog: Option<&Path>) -> Result<AssessmentEngine> {
    let configured = config.assessment.catalog_path.as_deref().map(Path::new);
    let catalog = CatalogLoader::resolve(catalog.or(configured)).await?;
    Ok(AssessmentEngine::from_config(catalog, config))
}

/// Read a YAML or JSON document.
pub async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .context(format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).context(format!("Failed to parse {}", path.display()))
}

/// A loosely typed answer as written in scripts and answer files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Response shaped for `question`.
    ///
    /// Select answers may name an option by number, text, or unique prefix;
    /// numeric text becomes a slider value on sliders. Everything else maps
    /// one to one.
    pub fn for_question(&self, question: &Question) -> Response {
        match (self, question.kind) {
            (Self::Text(text), QuestionKind::Slider) => text
                .trim()
                .parse::<f64>()
                .map_or_else(|_| Response::Single(text.clone()), Response::Slider),
            (Self::Text(text), QuestionKind::SingleSelect) => {
                Response::Single(resolve_option(question, text))
            }
            (Self::Number(number), QuestionKind::SingleSelect) => {
                Response::Single(resolve_option(question, &number.to_string()))
            }
            (Self::Text(text), QuestionKind::MultiSelect) => Response::Multi(
                text.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| resolve_option(question, item))
                    .collect(),
            ),
            (Self::List(items), QuestionKind::MultiSelect) => Response::Multi(
                items.iter().map(|item| resolve_option(question, item)).collect(),
            ),
            _ => self.clone().into_response(),
        }
    }

    /// Response without catalog context.
    pub fn into_response(self) -> Response {
        match self {
            Self::Number(value) => Response::Slider(value),
            Self::Text(text) => Response::Single(text),
            Self::List(values) => Response::Multi(values),
        }
    }
}

/// A synthesized profile with its guidance.
#[derive(Debug, Serialize)]
pub struct ProfileOutput {
    pub profile: Profile,
    pub guidance: String,
    pub entries: Vec<GuidanceEntry>,
    pub focus_areas: Vec<PermaDimension>,
    pub strengths: Vec<PermaDimension>,
    /// Mean of the five PERMA scores
    pub overall: f64,
    #[serde(skip)]
    pub interest_display_limit: usize,
}

impl ProfileOutput {
    pub fn build(engine: &AssessmentEngine, config: &Config, profile: Profile) -> Self {
        let guidance = engine.generate_guidance(
            &profile.perma_scores,
            Some(&profile.mbti_type),
            Some(&profile.sub_answers),
        );
        let entries = engine.guidance().plan(
            &profile.perma_scores,
            Some(&profile.mbti_type),
            Some(&profile.sub_answers),
        );
        let wellness = profile.wellness_config(&config.guidance);
        Self {
            overall: profile.perma_scores.average(),
            guidance,
            entries,
            focus_areas: wellness.focus_areas,
            strengths: wellness.strengths,
            interest_display_limit: config.profile.interest_display_limit,
            profile,
        }
    }
}

/// Resolve a 1-based option number, case-insensitive option text, or a
/// prefix matching exactly one option. Unmatched input is returned trimmed
/// so the engine can reject it.
pub fn resolve_option(question: &Question, input: &str) -> String {
    let input = input.trim();
    if let Ok(number) = input.parse::<usize>() {
        if let Some(option) = number.checked_sub(1).and_then(|i| question.options.get(i)) {
            return option.clone();
        }
    }
    if let Some(option) = question.options.iter().find(|o| o.eq_ignore_ascii_case(input)) {
        return option.clone();
    }

    let lowered = input.to_lowercase();
    let mut prefixed = question
        .options
        .iter()
        .filter(|o| !lowered.is_empty() && o.to_lowercase().starts_with(&lowered));
    match (prefixed.next(), prefixed.next()) {
        (Some(option), None) => option.clone(),
        _ => input.to_string(),
    }
}

fn join_dimensions(dimensions: &[PermaDimension]) -> String {
    if dimensions.is_empty() {
        return "none".to_string();
    }
    dimensions
        .iter()
        .map(PermaDimension::label)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CommandOutput for ProfileOutput {
    fn to_human(&self) -> String {
        let profile = &self.profile;
        let name = if profile.name.is_empty() { "Your profile" } else { profile.name.as_str() };

        let mut view = DetailView::new(name)
            .field("Type", &profile.mbti_type.to_string())
            .field("Style", &profile.communication_style)
            .field("Goal", &profile.primary_goal)
            .section("Wellbeing (PERMA)");
        for (dimension, score) in profile.perma_scores.iter() {
            view = view.field(dimension.label(), &score_bar(score));
        }
        view = view
            .field("Overall", &format!("{:.1}", self.overall))
            .field("Strengths", &join_dimensions(&self.strengths))
            .field("Focus areas", &join_dimensions(&self.focus_areas));

        let shown = profile.display_interests(self.interest_display_limit);
        if !shown.is_empty() {
            view = view.section("Interests");
            for interest in shown {
                view = view.item(interest);
            }
            let hidden = profile.interests.len() - shown.len();
            if hidden > 0 {
                view = view.item(&format!("and {hidden} more"));
            }
        }

        format!("{}\n\n{}", view.render(), self.guidance)
    }
}
