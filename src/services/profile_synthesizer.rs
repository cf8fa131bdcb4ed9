//! Turns a completed responses map into a [`Profile`].

use tracing::{debug, instrument};

use crate::domain::errors::{AssessmentError, DomainResult};
use crate::domain::models::catalog::{
    COMMUNICATION_STYLE_ID, DIRECT_ENTRY_ID, INTERESTS_ID, NAME_ID, PRIMARY_GOAL_ID,
};
use crate::domain::models::mbti;
use crate::domain::models::perma::{MAX_SCORE, MIN_SCORE};
use crate::domain::models::{
    MbtiDimension, MbtiType, PermaDimension, PermaScores, Profile, Response, Responses,
    SubAnswers,
};

/// Pure, deterministic profile synthesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileSynthesizer;

impl ProfileSynthesizer {
    pub const fn new() -> Self {
        Self
    }

    /// Build a profile from responses.
    ///
    /// Fails with `IncompleteProfile` when a PERMA score is missing, not
    /// numeric, or off the 0-10 scale, or when the type cannot be fully
    /// resolved.
    #[instrument(skip(self, responses), fields(answers = responses.len()))]
    pub fn synthesize(&self, responses: &Responses) -> DomainResult<Profile> {
        let perma_scores = self.perma_scores(responses)?;

        let mbti_type = self.preview_type(responses);
        if !mbti_type.is_complete() {
            return Err(AssessmentError::IncompleteProfile(format!(
                "type could not be resolved (got {mbti_type})"
            )));
        }

        let profile = Profile {
            name: trimmed(responses, NAME_ID),
            mbti_type,
            perma_scores,
            interests: normalize_interests(responses.get(INTERESTS_ID)),
            communication_style: trimmed(responses, COMMUNICATION_STYLE_ID),
            primary_goal: trimmed(responses, PRIMARY_GOAL_ID),
            sub_answers: sub_answers(responses),
        };
        debug!(mbti_type = %profile.mbti_type, interests = profile.interests.len(), "profile synthesized");
        Ok(profile)
    }

    /// Resolve the type from whatever has been answered so far.
    ///
    /// A valid direct-entry code wins. Otherwise each dimension answer
    /// contributes its letter and unanswered dimensions stay unresolved.
    pub fn preview_type(&self, responses: &Responses) -> MbtiType {
        if let Some(code) = responses.text(DIRECT_ENTRY_ID) {
            let validation = mbti::validate(code);
            if validation.is_valid {
                if let Some(mbti_type) = MbtiType::from_code(&validation.normalized) {
                    return mbti_type;
                }
            }
        }

        let letters = MbtiDimension::ALL.map(|dimension| {
            responses
                .text(dimension.question_id())
                .and_then(|answer| dimension.resolve_letter(answer))
        });
        MbtiType::from_letters(letters)
    }

    fn perma_scores(&self, responses: &Responses) -> DomainResult<PermaScores> {
        let mut scores = [0.0; 5];
        for (slot, dimension) in scores.iter_mut().zip(PermaDimension::ALL) {
            let id = dimension.question_id();
            let score = responses.number(id).ok_or_else(|| {
                AssessmentError::IncompleteProfile(format!("missing or non-numeric score for '{id}'"))
            })?;
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(AssessmentError::IncompleteProfile(format!(
                    "score {score} for '{id}' is outside [{MIN_SCORE}, {MAX_SCORE}]"
                )));
            }
            *slot = score;
        }
        Ok(PermaScores::new(scores))
    }
}

fn trimmed(responses: &Responses, id: &str) -> String {
    responses.text(id).map(str::trim).unwrap_or_default().to_string()
}

/// Trim, drop blanks, and de-duplicate case-insensitively keeping the first
/// spelling seen.
fn normalize_interests(response: Option<&Response>) -> Vec<String> {
    let raw: Vec<&str> = match (response.and_then(Response::as_list), response.and_then(Response::as_text)) {
        (Some(values), _) => values.iter().map(String::as_str).collect(),
        (None, Some(value)) => value.split(',').collect(),
        (None, None) => Vec::new(),
    };

    let mut interests: Vec<String> = Vec::with_capacity(raw.len());
    for item in raw {
        let item = item.trim();
        if item.is_empty() || interests.iter().any(|seen| seen.eq_ignore_ascii_case(item)) {
            continue;
        }
        interests.push(item.to_string());
    }
    interests
}

fn sub_answers(responses: &Responses) -> SubAnswers {
    PermaDimension::ALL
        .into_iter()
        .filter_map(|dimension| {
            let note = responses.text(dimension.note_question_id())?.trim();
            (!note.is_empty()).then(|| (dimension, note.to_string()))
        })
        .collect()
}
