//! Profile synthesis from an answers file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::{load_engine, read_document, AnswerValue, ProfileOutput};
use crate::cli::display::output;
use crate::domain::models::{Catalog, Config, Responses};

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Answers file (YAML or JSON map of question id to answer)
    pub responses: PathBuf,

    /// Catalog asset to use instead of the configured one
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Shape loose answers against the catalog where the question is known.
pub fn to_responses(catalog: &Catalog, answers: BTreeMap<String, AnswerValue>) -> Responses {
    answers
        .into_iter()
        .map(|(id, value)| {
            let response = match catalog.get(&id) {
                Ok(question) => value.for_question(question),
                Err(_) => value.into_response(),
            };
            (id, response)
        })
        .collect()
}

pub async fn execute(args: ScoreArgs, config: &Config, json_mode: bool) -> Result<()> {
    let engine = load_engine(config, args.catalog.as_deref()).await?;
    let answers: BTreeMap<String, AnswerValue> = read_document(&args.responses).await?;
    let responses = to_responses(engine.catalog(), answers);

    let profile = engine
        .synthesize_responses(&responses)
        .context(format!("Could not score {}", args.responses.display()))?;
    output(&ProfileOutput::build(&engine, config, profile), json_mode);
    Ok(())
}
