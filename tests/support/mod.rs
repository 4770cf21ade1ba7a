//! Shared helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A fresh `bnbscope` invocation, isolated from the ambient environment.
pub fn bnbscope() -> Command {
    let mut cmd = Command::cargo_bin("bnbscope").unwrap();
    cmd.env_remove("BNBSCOPE_DB");
    cmd.env_remove("BNBSCOPE_LOG");
    cmd
}

pub struct Fixture {
    // held so the directory outlives the test body
    #[allow(dead_code)]
    pub dir: TempDir,
    pub db: PathBuf,
}

/// A temporary database seeded with the demonstration dataset.
pub fn seeded_db() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nyc.db");
    bnbscope()
        .args(["init", "--seed-demo", "--db"])
        .arg(&db)
        .assert()
        .success();
    Fixture { dir, db }
}

/// Parse a command's stdout as JSON.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}
