//! `bnbscope init` - create the database schema, optionally with demo data.

use bnbscope_core::config::ScopeConfig;
use bnbscope_core::db::Database;
use bnbscope_core::error::Result;

use crate::cli::{Cli, OutputFormat};
use crate::commands::dispatch;

pub fn run(cli: &Cli, config: &ScopeConfig, seed_demo: bool) -> Result<()> {
    let path = dispatch::resolve_db_path(cli, config)?;

    let db = Database::create(&path)?;
    if seed_demo {
        db.seed_demo()?;
        tracing::info!("seeded demo dataset");
    }

    let boroughs = db.borough_count()?;
    let listings = db.listing_count()?;
    let security_events = db.security_event_count()?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "db": path,
                "boroughs": boroughs,
                "listings": listings,
                "security_events": security_events,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Initialized database at {}", path.display());
                println!(
                    "  {} boroughs, {} listings, {} security events",
                    boroughs, listings, security_events
                );
            }
        }
    }

    Ok(())
}
