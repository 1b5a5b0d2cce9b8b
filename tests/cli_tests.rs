//! End-to-end tests for the item-matcher binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn item_matcher() -> Command {
    Command::cargo_bin("item-matcher").unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn recordings(dir: &TempDir, names: &[&str]) -> std::path::PathBuf {
    let recordings = dir.path().join("recordings");
    fs::create_dir(&recordings).unwrap();
    for name in names {
        fs::write(recordings.join(name), b"").unwrap();
    }
    recordings
}

#[test]
fn test_reconcile_directory_text() {
    let dir = TempDir::new().unwrap();
    let titles = write(dir.path(), "titles.txt", "# messages\nHealth tips\nFarming\nJohn Doe\n");
    let right = recordings(&dir, &["Farming.mp3", "health tips.mp3", "Jon Doe.mp3", "extra.mp3"]);

    item_matcher()
        .arg("reconcile")
        .arg(&titles)
        .arg(&right)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exact"))
        .stdout(predicate::str::contains("Fuzzy @93"))
        .stdout(predicate::str::contains("Extra"))
        .stdout(predicate::str::contains("3 matched, 0 left only, 1 right only"));
}

#[test]
fn test_reconcile_json() {
    let dir = TempDir::new().unwrap();
    let titles = write(dir.path(), "titles.txt", "Doe John\nMissing one\n");
    let right = write(dir.path(), "files.txt", "John Doe.mp3\n");

    let output = item_matcher()
        .args(["reconcile", "--format", "json"])
        .arg(&titles)
        .arg(&right)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["generated_at"].is_string());
    assert_eq!(json["stats"]["matches"], 1);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["state"], "token_match");
    assert_eq!(items[0]["score"], 100);
    assert_eq!(items[0]["operation"], "Import");
    assert_eq!(items[1]["operation"], "Missing");
}

#[test]
fn test_reconcile_recipients_tsv() {
    let dir = TempDir::new().unwrap();
    let table = write(dir.path(), "recipients.tsv", "community\tgroup\nJirapa\tWomen\nWa\n");
    let right = recordings(&dir, &["Women - Jirapa.wav", "Wa.wav"]);

    item_matcher()
        .args(["reconcile", "--recipients", "--format", "tsv"])
        .arg(&table)
        .arg(&right)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("state\tscore\tleft\tright"))
        .stdout(predicate::str::contains("Jirapa - Women\tWomen - Jirapa"))
        .stdout(predicate::str::contains("exact_match\t0\tWa\tWa"));
}

#[test]
fn test_reconcile_pass_flags() {
    let dir = TempDir::new().unwrap();
    let titles = write(dir.path(), "titles.txt", "Doe John\n");
    let right = write(dir.path(), "files.txt", "John Doe.mp3\n");

    item_matcher()
        .args(["reconcile", "--no-token"])
        .arg(&titles)
        .arg(&right)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 matched, 1 left only, 1 right only"));
}

#[test]
fn test_reconcile_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    let titles = write(dir.path(), "titles.txt", "Farming\nFarming\n");
    let right = write(dir.path(), "files.txt", "Farming.mp3\n");

    item_matcher()
        .arg("reconcile")
        .arg(&titles)
        .arg(&right)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicates not allowed in left"));
}

#[test]
fn test_reconcile_rejects_threshold_below_minimum() {
    let dir = TempDir::new().unwrap();
    let titles = write(dir.path(), "titles.txt", "a\n");
    let right = write(dir.path(), "files.txt", "a.mp3\n");

    item_matcher()
        .args(["reconcile", "--fuzzy-threshold", "20"])
        .arg(&titles)
        .arg(&right)
        .assert()
        .failure()
        .stderr(predicate::str::contains("below the minimum"));
}

#[test]
fn test_reconcile_with_config_file() {
    let dir = TempDir::new().unwrap();
    let titles = write(dir.path(), "titles.txt", "John Doe\n");
    let right = write(dir.path(), "files.txt", "Jon Doe.mp3\n");
    let config = write(dir.path(), "config.json", r#"{"fuzzy_threshold": 95, "token": false}"#);

    item_matcher()
        .arg("reconcile")
        .arg(&titles)
        .arg(&right)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 matched"));
}

#[test]
fn test_score_text() {
    item_matcher()
        .args(["score", "John Doe", "Jon Doe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ratio:            93"))
        .stdout(predicate::str::contains("levenshtein:      88"));
}

#[test]
fn test_score_json_token_order() {
    let output = item_matcher()
        .args(["score", "--format", "json", "Doe John", "John Doe"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["token_sort_ratio"], 100);
    assert!(json["ratio"].as_u64().unwrap() < 90);
}

#[test]
fn test_missing_input_fails() {
    item_matcher()
        .args(["reconcile", "/nonexistent/titles.txt", "/nonexistent/files.txt"])
        .assert()
        .failure();
}
