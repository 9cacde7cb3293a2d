use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/results.md";
const DAY6: &str = "Time:      7  15   30\nDistance:  9  40  200\n";

fn aoc() -> Command {
    let mut cmd = Command::cargo_bin("aoc2023").unwrap();
    cmd.env_remove("AOC_INPUTS").env_remove("RUST_LOG");
    cmd
}

fn inputs_with(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

fn tampered(dir: &Path, from: &str, to: &str) -> std::path::PathBuf {
    let doc = fs::read_to_string(FIXTURE).unwrap();
    assert!(doc.contains(from), "fixture lost {from:?}");
    let path = dir.join("README.md");
    fs::write(&path, doc.replacen(from, to, 1)).unwrap();
    path
}

#[test]
fn check_accepts_consistent_table() {
    aoc()
        .args(["check", FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("days 1-6 consistent"))
        .stdout(predicate::str::contains("751.001µs"));
}

#[test]
fn check_rejects_tampered_total() {
    let dir = TempDir::new().unwrap();
    let path = tampered(dir.path(), "| 413.834µs |", "| 413.835µs |");
    aoc()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Total parse time is 413.835µs"));
}

#[test]
fn check_rejects_non_numeric_answer() {
    let dir = TempDir::new().unwrap();
    let path = tampered(dir.path(), "| 13 | 30 |", "| 13 | thirty |");
    aoc()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-numeric answer \"thirty\""));
}

#[test]
fn check_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    aoc().arg("check").arg(dir.path().join("nope.md")).assert().failure();
}

#[test]
fn solve_reads_test_inputs() {
    let dir = inputs_with(&[("day6test1.in", DAY6), ("day6.in", DAY6)]);
    aoc()
        .arg("--inputs")
        .arg(dir.path())
        .args(["solve", "6", "1", "2"])
        .assert()
        .success()
        .stdout("71503\n");
    aoc()
        .env("AOC_INPUTS", dir.path())
        .args(["solve", "6", "a"])
        .assert()
        .success()
        .stdout("288\n");
}

#[test]
fn solve_rejects_unknown_part() {
    let dir = inputs_with(&[("day6.in", DAY6)]);
    aoc()
        .arg("--inputs")
        .arg(dir.path())
        .args(["solve", "6", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 1/2"));
}

#[test]
fn bench_fails_on_missing_input() {
    let dir = inputs_with(&[("day6.in", DAY6)]);
    aoc()
        .arg("--inputs")
        .arg(dir.path())
        .args(["bench", "--from", "6", "--to", "7"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("day7.in"));
}

#[test]
fn bench_rejects_unknown_days_before_timing() {
    let dir = inputs_with(&[]);
    aoc()
        .arg("--inputs")
        .arg(dir.path())
        .args(["bench", "--from", "24", "--to", "30"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("day 26 has no solution"))
        .stderr(predicate::str::contains("day24.in").not());
}

#[test]
fn bench_prints_table() {
    let dir = inputs_with(&[("day6.in", DAY6)]);
    aoc()
        .arg("--inputs")
        .arg(dir.path())
        .args(["bench", "--from", "6", "--to", "6", "--runs", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("| Day | Name |"))
        .stdout(predicate::str::contains("| 6 | Wait For It | 288 | 71503 |"))
        .stdout(predicate::str::contains("| Total | | | |"));
}

#[test]
fn bench_appends_to_readme_once() {
    let dir = inputs_with(&[("day6.in", DAY6)]);
    let readme = dir.path().join("README.md");
    fs::write(&readme, "# Results\n").unwrap();
    let bench = || {
        let mut cmd = aoc();
        cmd.arg("--inputs").arg(dir.path()).args(["bench", "--from", "6", "--to", "6", "--readme"]).arg(&readme);
        cmd
    };

    bench().assert().success();
    let written = fs::read_to_string(&readme).unwrap();
    assert!(written.starts_with("# Results\n\n| Day |"), "{written}");
    aoc().arg("check").arg(&readme).assert().success();

    bench().assert().failure().stderr(predicate::str::contains("start at day 7"));
    assert_eq!(fs::read_to_string(&readme).unwrap(), written);
}
