//! Configuration for bnbscope
//!
//! A single TOML file carrying the database path and an optional override
//! of the borough rank table. Loaded once in `main` and passed down; the
//! core never reads configuration from global state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ranks::RankTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScopeConfig {
    /// Path to the SQLite database (overridden by --db / BNBSCOPE_DB)
    pub db_path: Option<PathBuf>,

    /// Borough rank reference table; defaults to the shipped table.
    /// Deserialization validates totality and rank uniqueness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranks: Option<RankTable>,
}

impl ScopeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ScopeConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// The effective rank table: the configured override or the default.
    pub fn rank_table(&self) -> RankTable {
        self.ranks.clone().unwrap_or_default()
    }
}
