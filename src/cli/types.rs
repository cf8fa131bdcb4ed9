//! CLI type definitions
//!
//! Top-level clap structures; each subcommand's arguments live next to its
//! implementation in `commands`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{
    catalog::CatalogArgs, guidance::GuidanceArgs, replay::ReplayArgs, score::ScoreArgs,
    take::TakeArgs, validate_type::ValidateTypeArgs,
};

#[derive(Parser, Debug)]
#[command(name = "compass")]
#[command(about = "Compass - adaptive personality and wellbeing assessment", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .compass/config.yaml)
    #[arg(short, long, global = true, env = "COMPASS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take the assessment interactively
    Take(TakeArgs),

    /// Run a scripted sequence of answers through the engine
    Replay(ReplayArgs),

    /// Synthesize a profile from a file of answers
    Score(ScoreArgs),

    /// Generate PERMA guidance for a set of scores
    Guidance(GuidanceArgs),

    /// List the questions of the catalog
    Catalog(CatalogArgs),

    /// Check a four-letter type code
    ValidateType(ValidateTypeArgs),
}
