//! End-to-end tests for the bnbscope binary.

mod support;

use std::io::Write;

use predicates::prelude::*;

use support::{bnbscope, seeded_db, stdout_json};

#[test]
fn test_no_command_is_a_usage_error() {
    bnbscope().assert().code(2);
}

#[test]
fn test_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nyc.db");

    bnbscope()
        .args(["init", "--db"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized database"));

    assert!(db.exists());
}

#[test]
fn test_init_quiet_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nyc.db");

    bnbscope()
        .args(["init", "--quiet", "--db"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_init_seed_demo_json_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nyc.db");

    let output = bnbscope()
        .args(["init", "--seed-demo", "--format", "json", "--db"])
        .arg(&db)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["boroughs"], 5);
    assert_eq!(json["listings"], 14);
}

#[test]
fn test_init_without_db_path_is_a_usage_error() {
    bnbscope().arg("init").assert().code(2);
}

#[test]
fn test_missing_database_is_a_data_error() {
    bnbscope()
        .args(["map", "--db", "/nonexistent/nyc.db"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("database not found"));
}

#[test]
fn test_missing_database_json_envelope() {
    let output = bnbscope()
        .args(["map", "--format", "json", "--db", "/nonexistent/nyc.db"])
        .assert()
        .code(3)
        .get_output()
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], 3);
    assert_eq!(json["error"]["type"], "database_not_found");
}

#[test]
fn test_map_lists_all_five_boroughs() {
    let fx = seeded_db();

    let output = bnbscope()
        .args(["map", "--format", "json", "--db"])
        .arg(&fx.db)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    let points = json["points"].as_array().unwrap();
    assert_eq!(points.len(), 5);

    let manhattan = points
        .iter()
        .find(|p| p["borough"] == "Manhattan")
        .unwrap();
    assert_eq!(manhattan["color"], "#ff928b");
    assert_eq!(manhattan["position"]["x"], 120);
    assert_eq!(manhattan["position"]["y"], 110);
    assert_eq!(manhattan["listings"], 4);
}

#[test]
fn test_map_human_output() {
    let fx = seeded_db();

    bnbscope()
        .args(["map", "--db"])
        .arg(&fx.db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Manhattan").and(predicate::str::contains("Staten Island")));
}

#[test]
fn test_chart_price_covers_all_boroughs() {
    let fx = seeded_db();

    let output = bnbscope()
        .args(["chart", "price", "--format", "json", "--db"])
        .arg(&fx.db)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["status"], "ready");
    assert_eq!(json["kind"], "price-listings");
    assert_eq!(json["rows"].as_array().unwrap().len(), 5);
}

#[test]
fn test_chart_price_filtered_to_one_borough() {
    let fx = seeded_db();

    let output = bnbscope()
        .args([
            "chart", "price", "--borough", "Manhattan", "--format", "json", "--db",
        ])
        .arg(&fx.db)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["borough"], "Manhattan");
    assert_eq!(rows[0]["listings"], 4);
    assert!((rows[0]["avg_price"].as_f64().unwrap() - 287.5).abs() < 1e-9);
}

#[test]
fn test_chart_crime_zero_fills_quiet_borough() {
    let fx = seeded_db();

    let output = bnbscope()
        .args([
            "chart", "crime", "--borough", "Staten Island", "--format", "json", "--db",
        ])
        .arg(&fx.db)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    let rows = json["rows"].as_array().unwrap();
    // one row per crime level, all zero: no recorded events there
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r["count"] == 0));
}

#[test]
fn test_chart_unknown_borough_fails_with_data_error() {
    let fx = seeded_db();

    bnbscope()
        .args(["chart", "price", "--borough", "Hoboken", "--db"])
        .arg(&fx.db)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown borough"));
}

#[test]
fn test_chart_potential_includes_reference_lines() {
    let fx = seeded_db();

    let output = bnbscope()
        .args(["chart", "potential", "--format", "json", "--db"])
        .arg(&fx.db)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["kind"], "tourism-crime");
    assert!(json["avg_crime_score"].is_number());
    assert!(json["avg_tourism"].is_number());

    let bronx = json["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["borough"] == "Bronx")
        .unwrap()
        .clone();
    assert!((bronx["crime_score"].as_f64().unwrap() - 7.0).abs() < 1e-9);
}

fn write_events(dir: &tempfile::TempDir, lines: &str) -> std::path::PathBuf {
    let path = dir.path().join("events.jsonl");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(lines.as_bytes()).unwrap();
    path
}

#[test]
fn test_session_replay_derives_views() {
    let fx = seeded_db();
    let events = write_events(
        &fx.dir,
        r#"{"click": {"borough": "Brooklyn", "listings": 20000, "tourism": 1200.0}}
{"click": {"borough": "Manhattan", "listings": 12000, "tourism": 2500.0}}
"#,
    );

    let output = bnbscope()
        .args(["session", "replay", "--format", "json", "--events"])
        .arg(&events)
        .args(["--db"])
        .arg(&fx.db)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["summary"]["applied"], 2);
    assert_eq!(json["summary"]["skipped"], 0);
    assert_eq!(json["view"]["best_investment"], "Manhattan");
    // cards come back best investment first
    let cards = json["view"]["cards"].as_array().unwrap();
    assert_eq!(cards[0]["borough"], "Manhattan");
    assert_eq!(cards[1]["borough"], "Brooklyn");
    assert_eq!(json["view"]["filter"]["mode"], "only");
}

#[test]
fn test_session_replay_skips_dead_remove_batch() {
    let fx = seeded_db();
    let events = write_events(
        &fx.dir,
        r#"{"click": {"borough": "Queens", "listings": 5000, "tourism": 800.0}}
{"remove": [{"borough": "Queens", "fired": false}]}
{"remove": [{"borough": "Queens", "fired": true}]}
"#,
    );

    let output = bnbscope()
        .args(["session", "replay", "--format", "json", "--events"])
        .arg(&events)
        .args(["--db"])
        .arg(&fx.db)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["summary"]["applied"], 2);
    assert_eq!(json["summary"]["skipped"], 1);
    assert!(json["view"]["cards"].as_array().unwrap().is_empty());
    assert_eq!(json["view"]["best_investment"], serde_json::Value::Null);
    assert_eq!(json["view"]["filter"]["mode"], "all");
}

#[test]
fn test_session_replay_reads_stdin() {
    let fx = seeded_db();

    bnbscope()
        .args(["session", "replay", "--db"])
        .arg(&fx.db)
        .write_stdin(r#"{"click": {"borough": "Bronx", "listings": 100, "tourism": 350.0}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("best investment: Bronx"));
}

#[test]
fn test_session_replay_unknown_borough_aborts() {
    let fx = seeded_db();
    let events = write_events(
        &fx.dir,
        r#"{"click": {"borough": "Gotham", "listings": 1, "tourism": 1.0}}"#,
    );

    bnbscope()
        .args(["session", "replay", "--events"])
        .arg(&events)
        .args(["--db"])
        .arg(&fx.db)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown borough"));
}

#[test]
fn test_session_replay_malformed_line_reports_position() {
    let fx = seeded_db();
    let events = write_events(
        &fx.dir,
        "{\"click\": {\"borough\": \"Queens\", \"listings\": 1, \"tourism\": 1.0}}\nnot json\n",
    );

    bnbscope()
        .args(["session", "replay", "--events"])
        .arg(&events)
        .args(["--db"])
        .arg(&fx.db)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_session_replay_with_charts_follows_selection() {
    let fx = seeded_db();
    let events = write_events(
        &fx.dir,
        r#"{"click": {"borough": "Manhattan", "listings": 12000, "tourism": 2500.0}}"#,
    );

    let output = bnbscope()
        .args([
            "session",
            "replay",
            "--with-charts",
            "--format",
            "json",
            "--events",
        ])
        .arg(&events)
        .args(["--db"])
        .arg(&fx.db)
        .assert()
        .success()
        .get_output()
        .clone();

    let json = stdout_json(&output);
    let charts = json["charts"].as_array().unwrap();
    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0]["status"], "ready");
    // the price chart is filtered to the selected borough
    let rows = charts[0]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["borough"], "Manhattan");
}

#[test]
fn test_config_file_supplies_db_path() {
    let fx = seeded_db();
    let config_path = fx.dir.path().join("bnbscope.toml");
    std::fs::write(
        &config_path,
        format!("db_path = {:?}\n", fx.db.to_str().unwrap()),
    )
    .unwrap();

    bnbscope()
        .args(["map", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Queens"));
}

#[test]
fn test_invalid_usage_json_envelope() {
    let output = bnbscope()
        .args(["chart", "sideways", "--format", "json"])
        .assert()
        .code(2)
        .get_output()
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], 2);
    assert_eq!(json["error"]["type"], "usage_error");
}
