//! `bnbscope chart` - run one aggregation and emit its dataset.

use std::collections::BTreeSet;

use bnbscope_core::borough::Borough;
use bnbscope_core::charts::{self, Chart, ChartDataset};
use bnbscope_core::config::ScopeConfig;
use bnbscope_core::error::Result;
use bnbscope_core::selection::BoroughFilter;

use crate::cli::{ChartKind, Cli, OutputFormat};
use crate::commands::dispatch;

pub fn run(cli: &Cli, config: &ScopeConfig, kind: ChartKind, boroughs: &[String]) -> Result<()> {
    let filter = parse_filter(boroughs)?;
    let db = dispatch::open_db(cli, config)?;

    let chart = charts::build_chart(kind.into(), &db, &filter)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&chart)?),
        OutputFormat::Human => print_human(&chart),
    }

    Ok(())
}

/// Borough names from the command line. Validation happens here at the
/// boundary; no restriction means the distinct all-boroughs mode.
fn parse_filter(names: &[String]) -> Result<BoroughFilter> {
    if names.is_empty() {
        return Ok(BoroughFilter::All);
    }
    let set = names
        .iter()
        .map(|n| Borough::parse(n))
        .collect::<Result<BTreeSet<_>>>()?;
    Ok(BoroughFilter::Only(set))
}

fn print_human(chart: &Chart) {
    match chart {
        Chart::Unavailable { kind, reason } => {
            println!("{}", kind.title());
            println!("  data unavailable: {}", reason);
        }
        Chart::Ready { dataset } => match dataset {
            ChartDataset::PriceListings(chart) => {
                println!("{}", chart.title);
                for row in &chart.rows {
                    println!(
                        "  {:<14} avg ${:>8.2}  {} listings",
                        row.borough.name(),
                        row.avg_price,
                        row.listings
                    );
                }
            }
            ChartDataset::RoomPrices(chart) => {
                println!("{}", chart.title);
                for b in &chart.boxes {
                    println!(
                        "  {:<16} {:<14} min {:.2}  q1 {:.2}  median {:.2}  q3 {:.2}  max {:.2}  (n={})",
                        b.room_type.name(),
                        b.borough.name(),
                        b.stats.min,
                        b.stats.q1,
                        b.stats.median,
                        b.stats.q3,
                        b.stats.max,
                        b.stats.n
                    );
                }
            }
            ChartDataset::CrimeBreakdown(chart) => {
                println!("{}", chart.title);
                for row in &chart.rows {
                    println!(
                        "  {:<14} {:<12} {}",
                        row.borough.name(),
                        row.level.name(),
                        row.count
                    );
                }
            }
            ChartDataset::TourismCrime(chart) => {
                println!("{}", chart.title);
                for row in &chart.rows {
                    println!(
                        "  {:<14} tourism ${:>8.2}  crime score {:.1}",
                        row.borough.name(),
                        row.tourism,
                        row.crime_score
                    );
                }
                println!(
                    "  averages: tourism ${:.2}, crime score {:.1}",
                    chart.avg_tourism, chart.avg_crime_score
                );
            }
        },
    }
}
