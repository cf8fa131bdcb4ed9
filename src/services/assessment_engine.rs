//! Conversation state machine for the adaptive assessment.
//!
//! Every operation takes the current [`ConversationState`] by reference and
//! returns the next one, so a session is just a value the caller threads
//! through successive calls. Nothing here performs I/O or reads the clock.
//!
//! Transition table for a submitted answer:
//!
//! | current question | answer              | next                                   |
//! |------------------|---------------------|----------------------------------------|
//! | `mbti_know`      | knows type          | `mbti_type`, flag set                  |
//! | `mbti_know`      | not sure            | first dimension question, flag cleared |
//! | `mbti_type`      | valid code          | catalog order (dimensions skipped)     |
//! | `mbti_type`      | invalid, under limit| same question + format hint            |
//! | `mbti_type`      | invalid, at limit   | first dimension question, flag cleared |
//! | anything else    | any                 | next eligible question in order        |

use tracing::{debug, info, warn};

use crate::domain::errors::{AssessmentError, DomainResult};
use crate::domain::models::catalog::{DIRECT_ENTRY_ID, GATING_ID};
use crate::domain::models::config::Config;
use crate::domain::models::mbti;
use crate::domain::models::{
    Catalog, ConversationPhase, ConversationState, MbtiType, Notice, PermaScores, Profile,
    Progress, Question, QuestionKind, Response, Responses, SubAnswers,
};

use super::guidance_generator::GuidanceGenerator;
use super::profile_synthesizer::ProfileSynthesizer;

/// Drives one assessment at a time over an immutable catalog.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    catalog: Catalog,
    max_mbti_attempts: u32,
    synthesizer: ProfileSynthesizer,
    guidance: GuidanceGenerator,
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl AssessmentEngine {
    /// Create an engine with default settings.
    pub fn new(catalog: Catalog) -> Self {
        Self::from_config(catalog, &Config::default())
    }

    /// Create an engine with settings taken from configuration.
    pub fn from_config(catalog: Catalog, config: &Config) -> Self {
        Self {
            catalog,
            max_mbti_attempts: config.assessment.max_mbti_attempts.max(1),
            synthesizer: ProfileSynthesizer::new(),
            guidance: GuidanceGenerator::new(config.guidance.clone()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Begin a session at the first catalog question.
    pub fn start_assessment(&self) -> ConversationState {
        match self.catalog.first() {
            Some(first) => {
                debug!(question_id = %first.id, catalog_version = %self.catalog.version(), "assessment started");
                ConversationState::starting_at(&first.id)
            }
            None => {
                let mut state = ConversationState::starting_at("");
                state.history.clear();
                state.phase = ConversationPhase::Complete;
                state
            }
        }
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self, state: &ConversationState) -> DomainResult<Option<&Question>> {
        state
            .current_question_id()
            .map(|id| self.catalog.get(id))
            .transpose()
    }

    /// Record an answer to the current question and move on.
    ///
    /// Empty submissions and submissions on a complete state return the state
    /// unchanged. A value whose shape does not fit the current question fails
    /// with `MalformedResponse` and leaves the state untouched.
    pub fn submit_answer(
        &self,
        state: &ConversationState,
        answer: Response,
    ) -> DomainResult<ConversationState> {
        let Some(current_id) = state.current_question_id() else {
            debug!("answer submitted after completion; ignoring");
            return Ok(state.clone());
        };
        let question = self.catalog.get(current_id)?;

        if answer.is_empty() {
            debug!(question_id = %question.id, "empty submission; ignoring");
            return Ok(state.clone());
        }
        if let Err(err) = question.check_shape(&answer) {
            warn!(question_id = %question.id, error = %err, "malformed response rejected");
            return Err(err);
        }

        let answer = dedupe_selection(answer);
        let mut next = state.clone();
        next.notice = None;
        next.pending_selection.clear();

        let destination = match question.id.as_str() {
            GATING_ID => self.apply_gating_answer(&mut next, answer)?,
            DIRECT_ENTRY_ID => match self.apply_direct_entry(&mut next, &answer)? {
                Some(destination) => destination,
                None => return Ok(next),
            },
            _ => {
                next.responses.insert(question.id.clone(), answer);
                let index = self.catalog.index_of(&question.id)?;
                self.catalog
                    .next_eligible(index, next.knows_own_type)
                    .map(|q| q.id.clone())
            }
        };

        Ok(self.advance(next, destination))
    }

    /// Record the gating answer, set the branch flag, and pick the jump target.
    fn apply_gating_answer(
        &self,
        next: &mut ConversationState,
        answer: Response,
    ) -> DomainResult<Option<String>> {
        let knows = self
            .catalog
            .gating_answer_knows_type(answer.as_text().unwrap_or_default())?;
        next.knows_own_type = knows;
        next.invalid_mbti_attempts = 0;
        next.responses.insert(GATING_ID, answer);

        let target = if knows {
            self.catalog.get(DIRECT_ENTRY_ID)?
        } else {
            self.catalog.first_dimension_question()?
        };
        debug!(knows_own_type = knows, next = %target.id, "gating question answered");
        Ok(Some(target.id.clone()))
    }

    /// Validate a direct-entry code.
    ///
    /// Returns `None` when the same question should be asked again, otherwise
    /// the destination for `advance`.
    fn apply_direct_entry(
        &self,
        next: &mut ConversationState,
        answer: &Response,
    ) -> DomainResult<Option<Option<String>>> {
        let validation = mbti::validate(answer.as_text().unwrap_or_default());

        if validation.is_valid {
            debug!(code = %validation.normalized, "type code accepted");
            next.knows_own_type = true;
            next.invalid_mbti_attempts = 0;
            next.responses
                .insert(DIRECT_ENTRY_ID, Response::Single(validation.normalized));
            let index = self.catalog.index_of(DIRECT_ENTRY_ID)?;
            return Ok(Some(
                self.catalog.next_eligible(index, true).map(|q| q.id.clone()),
            ));
        }

        next.invalid_mbti_attempts += 1;
        next.responses.remove(DIRECT_ENTRY_ID);

        if next.invalid_mbti_attempts < self.max_mbti_attempts {
            debug!(
                attempts = next.invalid_mbti_attempts,
                input = %validation.normalized,
                "type code not recognized; asking again"
            );
            next.notice = Some(Notice::MbtiFormatHint);
            return Ok(None);
        }

        let first_dimension = self.catalog.first_dimension_question()?;
        info!(
            attempts = next.invalid_mbti_attempts,
            next = %first_dimension.id,
            "type code rejected repeatedly; rerouting to dimension questions"
        );
        next.knows_own_type = false;
        next.invalid_mbti_attempts = 0;
        next.notice = Some(Notice::MbtiRerouted);
        Ok(Some(Some(first_dimension.id.clone())))
    }

    fn advance(&self, mut next: ConversationState, destination: Option<String>) -> ConversationState {
        match destination {
            Some(id) => {
                debug!(question_id = %id, depth = next.history.len(), "advancing");
                next.history.push(id.clone());
                next.phase = ConversationPhase::AwaitingAnswer { question_id: id };
            }
            None => {
                info!(
                    answered = next.responses.len(),
                    knows_own_type = next.knows_own_type,
                    "assessment complete"
                );
                next.phase = ConversationPhase::Complete;
            }
        }
        next
    }

    /// Undo the most recent forward step.
    ///
    /// The question before it becomes current again and its recorded answer
    /// is discarded, so the user re-answers from blank. At the first question
    /// this is a no-op.
    pub fn go_back(&self, state: &ConversationState) -> ConversationState {
        let mut next = state.clone();

        let reopened = if state.is_complete() {
            // The last answered question is still on top of the history.
            next.history.last().cloned()
        } else if state.can_go_back() {
            next.history.pop();
            next.history.last().cloned()
        } else {
            None
        };

        let Some(question_id) = reopened else {
            debug!("nothing to go back to");
            return state.clone();
        };

        next.responses.remove(&question_id);
        next.pending_selection.clear();
        next.notice = None;
        next.invalid_mbti_attempts = 0;
        debug!(question_id = %question_id, depth = next.history.len(), "went back");
        next.phase = ConversationPhase::AwaitingAnswer { question_id };
        next
    }

    /// Toggle one option of the current multi-select question without
    /// submitting it.
    pub fn toggle_selection(
        &self,
        state: &ConversationState,
        option: &str,
    ) -> DomainResult<ConversationState> {
        let Some(question) = self.current_question(state)? else {
            return Ok(state.clone());
        };
        if question.kind != QuestionKind::MultiSelect {
            return Err(AssessmentError::malformed(
                &question.id,
                question.kind,
                "only multi-select questions take toggled selections",
            ));
        }
        if !question.has_option(option) {
            return Err(AssessmentError::malformed(
                &question.id,
                question.kind,
                format!("'{option}' is not one of the options"),
            ));
        }

        let mut next = state.clone();
        if let Some(pos) = next.pending_selection.iter().position(|o| o == option) {
            next.pending_selection.remove(pos);
        } else {
            next.pending_selection.push(option.to_string());
            // Keep selections in option order.
            next.pending_selection
                .sort_by_key(|o| question.options.iter().position(|x| x == o));
        }
        Ok(next)
    }

    /// Submit the toggled selection as the current question's answer.
    pub fn submit_selection(&self, state: &ConversationState) -> DomainResult<ConversationState> {
        self.submit_answer(state, Response::Multi(state.pending_selection.clone()))
    }

    /// Answered versus remaining eligible questions.
    pub fn progress(&self, state: &ConversationState) -> DomainResult<Progress> {
        let remaining = match state.current_question_id() {
            Some(id) => {
                let index = self.catalog.index_of(id)?;
                1 + self.catalog.eligible_after(index, state.knows_own_type)
            }
            None => 0,
        };
        Ok(Progress {
            answered: state.responses.len(),
            remaining,
        })
    }

    /// Synthesize the profile of a completed session.
    pub fn synthesize_profile(&self, state: &ConversationState) -> DomainResult<Profile> {
        let responses = state.completed_responses().ok_or_else(|| {
            AssessmentError::IncompleteProfile("the assessment has not been completed".to_string())
        })?;
        self.synthesizer.synthesize(responses)
    }

    /// Best-effort type from the answers so far.
    pub fn preview_type(&self, state: &ConversationState) -> MbtiType {
        self.synthesizer.preview_type(state.responses())
    }

    /// Prioritized guidance narrative for a set of scores.
    pub fn generate_guidance(
        &self,
        scores: &PermaScores,
        mbti_type: Option<&MbtiType>,
        sub_answers: Option<&SubAnswers>,
    ) -> String {
        self.guidance.generate(scores, mbti_type, sub_answers)
    }

    pub fn guidance(&self) -> &GuidanceGenerator {
        &self.guidance
    }

    pub fn synthesizer(&self) -> &ProfileSynthesizer {
        &self.synthesizer
    }

    /// Synthesize directly from a responses map, e.g. one restored by a
    /// caller from storage.
    pub fn synthesize_responses(&self, responses: &Responses) -> DomainResult<Profile> {
        self.synthesizer.synthesize(responses)
    }
}

/// Multi-select answers are sets: drop repeats, keep first occurrence.
fn dedupe_selection(answer: Response) -> Response {
    match answer {
        Response::Multi(values) => {
            let mut unique: Vec<String> = Vec::with_capacity(values.len());
            for value in values {
                if !unique.contains(&value) {
                    unique.push(value);
                }
            }
            Response::Multi(unique)
        }
        other => other,
    }
}
