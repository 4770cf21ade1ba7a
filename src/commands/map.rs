//! `bnbscope map` - the clickable borough marker dataset.

use bnbscope_core::config::ScopeConfig;
use bnbscope_core::error::Result;
use bnbscope_core::metrics::MetricsProvider;

use crate::cli::{Cli, OutputFormat};
use crate::commands::dispatch;

pub fn run(cli: &Cli, config: &ScopeConfig) -> Result<()> {
    let db = dispatch::open_db(cli, config)?;
    let points = db.map_points()?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "points": points });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            for point in &points {
                println!(
                    "{:<14} ({:>3},{:>3})  {} listings, ${:.2} tourism revenue  {}",
                    point.borough.name(),
                    point.position.x,
                    point.position.y,
                    point.listings,
                    point.tourism,
                    point.color,
                );
            }
        }
    }

    Ok(())
}
