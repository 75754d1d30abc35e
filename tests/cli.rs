use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("hoverchart").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("probe"));
}

#[test]
fn probe_prints_tooltip_labels() {
    let mut cmd = Command::cargo_bin("hoverchart").unwrap();
    cmd.args(["probe", "tests/data/weight.json", "--x", "117"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("value=17 kg"))
        .stdout(predicate::str::contains("date=05 Mar"));
}

#[test]
fn probe_left_of_the_data_uses_last_sample() {
    let mut cmd = Command::cargo_bin("hoverchart").unwrap();
    cmd.args(["probe", "tests/data/weight.json", "--x", "-30"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("date=20 Mar"));
}

#[test]
fn render_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.svg");
    let mut cmd = Command::cargo_bin("hoverchart").unwrap();
    cmd.args(["render", "tests/data/weight.json", "--id", "documents", "--out"])
        .arg(&out);
    cmd.assert().success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("id=\"documents\""));
}

#[test]
fn page_with_empty_series_fails_but_shows_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("page.html");
    let mut cmd = Command::cargo_bin("hoverchart").unwrap();
    cmd.args(["page", "tests/data/empty.json", "--title", "documents", "--out"])
        .arg(&out);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no samples"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("chart-error"));
    assert!(!html.contains("<svg"));
}

#[test]
fn missing_file_fails() {
    let mut cmd = Command::cargo_bin("hoverchart").unwrap();
    cmd.args(["render", "tests/data/nope.json", "--out", "unused.svg"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}
