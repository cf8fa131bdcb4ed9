//! Compass CLI entry point.

use anyhow::Result;
use clap::Parser;

use compass::cli::commands;
use compass::cli::{Cli, Commands};
use compass::infrastructure::config::ConfigLoader;
use compass::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        compass::cli::handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load_with_override(cli.config.as_deref())?;

    let mut log_config = LogConfig::from_settings(&config.logging)?;
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    let _logger = LoggerImpl::init(&log_config)?;

    match cli.command {
        Commands::Take(args) => commands::take::execute(args, &config, cli.json).await,
        Commands::Replay(args) => commands::replay::execute(args, &config, cli.json).await,
        Commands::Score(args) => commands::score::execute(args, &config, cli.json).await,
        Commands::Guidance(args) => commands::guidance::execute(args, &config, cli.json).await,
        Commands::Catalog(args) => commands::catalog::execute(args, &config, cli.json).await,
        Commands::ValidateType(args) => commands::validate_type::execute(args, cli.json).await,
    }
}
