//! CLI argument parsing for bnbscope
//!
//! Global flags: --db, --config, --format, --quiet, --verbose

pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use bnbscope_core::metrics::MetricKind;
pub use output::OutputFormat;

/// Bnbscope - NYC Airbnb borough analytics CLI
#[derive(Parser, Debug)]
#[command(name = "bnbscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, env = "BNBSCOPE_DB")]
    pub db: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON to stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database schema
    Init {
        /// Load a small demonstration dataset
        #[arg(long)]
        seed_demo: bool,
    },

    /// Emit the clickable borough map dataset
    Map,

    /// Run one chart aggregation and emit its dataset
    Chart {
        /// Which chart to build
        #[arg(value_enum)]
        kind: ChartKind,

        /// Restrict to a borough (repeatable); none means all boroughs
        #[arg(long, short, action = clap::ArgAction::Append)]
        borough: Vec<String>,
    },

    /// Borough selection sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Apply a JSON Lines event stream and emit the derived views
    Replay {
        /// Event file (defaults to stdin)
        #[arg(long)]
        events: Option<PathBuf>,

        /// Also emit the filtered price and room charts
        #[arg(long)]
        with_charts: bool,
    },
}

/// Chart selector on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Average price and listing count per borough
    Price,
    /// Price distribution by room type
    Rooms,
    /// Crime type breakdown per borough
    Crime,
    /// Tourism revenue vs crime score
    Potential,
}

impl From<ChartKind> for MetricKind {
    fn from(kind: ChartKind) -> MetricKind {
        match kind {
            ChartKind::Price => MetricKind::PriceListings,
            ChartKind::Rooms => MetricKind::RoomPrices,
            ChartKind::Crime => MetricKind::CrimeBreakdown,
            ChartKind::Potential => MetricKind::TourismCrime,
        }
    }
}
