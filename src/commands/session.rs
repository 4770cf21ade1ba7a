//! `bnbscope session replay` - apply a JSON Lines event stream and emit
//! the derived views.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use bnbscope_core::charts::{self, Chart};
use bnbscope_core::config::ScopeConfig;
use bnbscope_core::error::Result;
use bnbscope_core::metrics::MetricKind;
use bnbscope_core::session::{self, Session};

use crate::cli::{Cli, OutputFormat};
use crate::commands::dispatch;

pub fn replay(
    cli: &Cli,
    config: &ScopeConfig,
    events_path: Option<&Path>,
    with_charts: bool,
) -> Result<()> {
    let events = match events_path {
        Some(path) => session::parse_events(BufReader::new(File::open(path)?))?,
        None => session::parse_events(io::stdin().lock())?,
    };
    tracing::debug!(count = events.len(), "events_parsed");

    let mut session = Session::new(config.rank_table());
    let summary = session::replay(&mut session, &events, |_| Ok(()))?;
    let view = session.view();

    // Charts reflect the final selection's name filter; an unavailable
    // chart is carried as its placeholder rather than failing the replay.
    let charts = if with_charts {
        let db = dispatch::open_db(cli, config)?;
        let filter = session.selection().name_filter();
        Some(vec![
            charts::build_chart(MetricKind::PriceListings, &db, &filter)?,
            charts::build_chart(MetricKind::RoomPrices, &db, &filter)?,
        ])
    } else {
        None
    };

    match cli.format {
        OutputFormat::Json => {
            let mut output = serde_json::json!({
                "summary": summary,
                "view": view,
            });
            if let Some(charts) = &charts {
                output["charts"] = serde_json::to_value(charts)?;
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("applied {} events, skipped {}", summary.applied, summary.skipped);
            if view.cards.is_empty() {
                println!("no boroughs selected");
            } else {
                println!("selected boroughs:");
                for card in &view.cards {
                    println!(
                        "  {:<14} investment #{}  crime #{}  {} listings  ${:.2} tourism",
                        card.borough.name(),
                        card.investment_rank,
                        card.crime_rank,
                        card.listings,
                        card.tourism
                    );
                }
            }
            match view.best_investment {
                Some(borough) => println!("best investment: {}", borough.name()),
                None => println!("best investment: none"),
            }
            if let Some(charts) = &charts {
                for chart in charts {
                    if let Chart::Unavailable { kind, reason } = chart {
                        println!("chart {} unavailable: {}", kind.title(), reason);
                    }
                }
                println!("({} charts built)", charts.len());
            }
        }
    }

    Ok(())
}
