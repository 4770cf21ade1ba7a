//! Error types and exit codes for bnbscope
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (unknown borough, invalid rank table, missing database)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - reference data or database problems (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for ScopeError {
    fn from(err: rusqlite::Error) -> Self {
        ScopeError::Other(err.to_string())
    }
}

/// Errors that can occur during bnbscope operations
#[derive(Error, Debug)]
pub enum ScopeError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("unknown borough: {name} (expected one of: Manhattan, Brooklyn, Queens, Bronx, Staten Island)")]
    UnknownBorough { name: String },

    #[error("invalid rank table: {reason}")]
    InvalidRankTable { reason: String },

    #[error("database not found at {path:?} (run `bnbscope init` to create one)")]
    DatabaseNotFound { path: PathBuf },

    #[error("invalid event at line {line}: {reason}")]
    InvalidEvent { line: usize, reason: String },

    // Recoverable per chart: the caller substitutes a labeled placeholder
    #[error("chart data unavailable: {reason}")]
    DataUnavailable { reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl ScopeError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ScopeError::UsageError(_) => ExitCode::Usage,

            ScopeError::UnknownBorough { .. }
            | ScopeError::InvalidRankTable { .. }
            | ScopeError::DatabaseNotFound { .. }
            | ScopeError::InvalidEvent { .. } => ExitCode::Data,

            ScopeError::DataUnavailable { .. }
            | ScopeError::Io(_)
            | ScopeError::Json(_)
            | ScopeError::Toml(_)
            | ScopeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            ScopeError::UsageError(_) => "usage_error",
            ScopeError::UnknownBorough { .. } => "unknown_borough",
            ScopeError::InvalidRankTable { .. } => "invalid_rank_table",
            ScopeError::DatabaseNotFound { .. } => "database_not_found",
            ScopeError::InvalidEvent { .. } => "invalid_event",
            ScopeError::DataUnavailable { .. } => "data_unavailable",
            ScopeError::Io(_) => "io_error",
            ScopeError::Json(_) => "json_error",
            ScopeError::Toml(_) => "toml_error",
            ScopeError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for bnbscope operations
pub type Result<T> = std::result::Result<T, ScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_taxonomy() {
        let err = ScopeError::UnknownBorough {
            name: "Hoboken".into(),
        };
        assert_eq!(err.exit_code(), ExitCode::Data);

        let err = ScopeError::UsageError("bad flag".into());
        assert_eq!(err.exit_code(), ExitCode::Usage);

        let err = ScopeError::DataUnavailable {
            reason: "no such table".into(),
        };
        assert_eq!(err.exit_code(), ExitCode::Failure);
    }

    #[test]
    fn test_json_envelope_shape() {
        let err = ScopeError::InvalidRankTable {
            reason: "missing Queens".into(),
        };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "invalid_rank_table");
    }
}
