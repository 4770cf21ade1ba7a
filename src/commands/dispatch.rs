//! Command dispatch: load configuration once, resolve the database path,
//! and route to the command implementations.

use std::path::PathBuf;
use std::time::Instant;

use bnbscope_core::config::ScopeConfig;
use bnbscope_core::db::Database;
use bnbscope_core::error::{Result, ScopeError};

use crate::cli::{Cli, Commands, SessionCommands};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = load_config(cli)?;

    let Some(command) = &cli.command else {
        return Err(ScopeError::UsageError(
            "no command given (try `bnbscope --help`)".to_string(),
        ));
    };

    let result = match command {
        Commands::Init { seed_demo } => super::init::run(cli, &config, *seed_demo),
        Commands::Map => super::map::run(cli, &config),
        Commands::Chart { kind, borough } => super::chart::run(cli, &config, *kind, borough),
        Commands::Session { command } => match command {
            SessionCommands::Replay {
                events,
                with_charts,
            } => super::session::replay(cli, &config, events.as_deref(), *with_charts),
        },
    };

    if cli.verbose {
        tracing::info!(elapsed = ?start.elapsed(), "command_complete");
    }

    result
}

fn load_config(cli: &Cli) -> Result<ScopeConfig> {
    match &cli.config {
        Some(path) => ScopeConfig::load(path),
        None => Ok(ScopeConfig::default()),
    }
}

/// Database path precedence: --db / BNBSCOPE_DB, then the config file.
pub(crate) fn resolve_db_path(cli: &Cli, config: &ScopeConfig) -> Result<PathBuf> {
    cli.db
        .clone()
        .or_else(|| config.db_path.clone())
        .ok_or_else(|| {
            ScopeError::UsageError(
                "no database path given (use --db, BNBSCOPE_DB, or db_path in the config file)"
                    .to_string(),
            )
        })
}

/// Open the resolved database for reading.
pub(crate) fn open_db(cli: &Cli, config: &ScopeConfig) -> Result<Database> {
    let path = resolve_db_path(cli, config)?;
    tracing::debug!(path = %path.display(), "open_database");
    Database::open(&path)
}
