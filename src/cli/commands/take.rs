//! Interactive assessment over stdin.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

use super::{load_engine, resolve_option, ProfileOutput};
use crate::cli::display::{action_failure, action_success, output};
use crate::domain::models::{
    Config, ConversationState, Profile, Question, QuestionKind, Response,
};
use crate::services::AssessmentEngine;

#[derive(Args, Debug)]
pub struct TakeArgs {
    /// Catalog asset to use instead of the configured one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Write the completed profile as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// What one line typed by the user asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatInput {
    Back,
    Answer(Response),
    /// Options to toggle on before submitting a multi-select answer
    Select(Vec<String>),
}

/// Interpret a line of input for `question`.
///
/// Select questions accept an option number, its text or a unique prefix,
/// and multi-select takes a comma-separated list. Anything unparseable is
/// passed through so the engine can reject it.
pub fn parse_input(question: &Question, line: &str) -> ChatInput {
    let line = line.trim();
    if line.eq_ignore_ascii_case("back") {
        return ChatInput::Back;
    }

    match question.kind {
        QuestionKind::SingleSelect => ChatInput::Answer(Response::Single(resolve_option(question, line))),
        QuestionKind::MultiSelect => ChatInput::Select(
            line.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| resolve_option(question, item))
                .collect(),
        ),
        QuestionKind::Slider => match line.parse::<f64>() {
            Ok(value) => ChatInput::Answer(Response::Slider(value)),
            Err(_) => ChatInput::Answer(Response::Single(line.to_string())),
        },
        QuestionKind::FreeText => ChatInput::Answer(Response::Single(line.to_string())),
    }
}

/// Saved form of a completed assessment.
#[derive(Debug, Serialize)]
pub struct ProfileEnvelope<'a> {
    pub session_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub catalog_version: &'a str,
    pub profile: &'a Profile,
    pub guidance: &'a str,
}

fn render_prompt(engine: &AssessmentEngine, state: &ConversationState, question: &Question) -> Result<()> {
    let progress = engine.progress(state)?;
    eprintln!();
    if let Some(notice) = state.notice() {
        eprintln!("{}", style(notice.message()).yellow());
    }
    eprintln!(
        "{} {}",
        style(format!("[{}/{}]", progress.answered + 1, progress.total())).dim(),
        style(&question.prompt).bold()
    );

    for (i, option) in question.options.iter().enumerate() {
        eprintln!("  {}. {option}", i + 1);
    }
    match question.kind {
        QuestionKind::MultiSelect => eprintln!("{}", style("Pick numbers separated by commas.").dim()),
        QuestionKind::Slider => {
            if let Some(range) = question.range {
                eprintln!("{}", style(format!("Enter a number from {} to {}.", range.min, range.max)).dim());
            }
        }
        _ => {}
    }
    if state.can_go_back() {
        eprintln!("{}", style("(type 'back' to change your previous answer)").dim());
    }
    Ok(())
}

fn select(
    engine: &AssessmentEngine,
    state: &ConversationState,
    options: &[String],
) -> crate::domain::DomainResult<ConversationState> {
    let mut next = state.clone();
    for option in options {
        if !next.pending_selection().contains(option) {
            next = engine.toggle_selection(&next, option)?;
        }
    }
    engine.submit_selection(&next)
}

pub async fn execute(args: TakeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let engine = load_engine(config, args.catalog.as_deref()).await?;
    let session_id = Uuid::new_v4();
    info!(%session_id, catalog_version = %engine.catalog().version(), "assessment session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut state = engine.start_assessment();

    while let Some(question) = engine.current_question(&state)? {
        render_prompt(&engine, &state, question)?;

        let Some(line) = lines.next_line().await.context("Failed to read from stdin")? else {
            anyhow::bail!("Input ended before the assessment was complete");
        };

        let next = match parse_input(question, &line) {
            ChatInput::Back => Ok(engine.go_back(&state)),
            ChatInput::Answer(response) => engine.submit_answer(&state, response),
            ChatInput::Select(options) => select(&engine, &state, &options),
        };
        match next {
            Ok(next) => state = next,
            Err(err) if err.is_recoverable() => eprintln!("{}", action_failure(&err.to_string())),
            Err(err) => return Err(err.into()),
        }
    }

    let profile = engine
        .synthesize_profile(&state)
        .context("Failed to synthesize profile")?;
    let out = ProfileOutput::build(&engine, config, profile);

    if let Some(path) = &args.output {
        let envelope = ProfileEnvelope {
            session_id,
            completed_at: Utc::now(),
            catalog_version: engine.catalog().version(),
            profile: &out.profile,
            guidance: &out.guidance,
        };
        let body = serde_json::to_string_pretty(&envelope).context("Failed to serialize profile")?;
        tokio::fs::write(path, body)
            .await
            .context(format!("Failed to write profile to {}", path.display()))?;
        eprintln!("{}", action_success(&format!("Profile saved to {}", path.display())));
    }

    info!(%session_id, mbti_type = %out.profile.mbti_type, "assessment session finished");
    eprintln!();
    output(&out, json_mode);
    Ok(())
}
