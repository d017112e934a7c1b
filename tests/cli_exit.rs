// tests/cli_exit.rs - Exit code tests against the built binary
use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn workspace() -> TempDir {
    let d = tempfile::tempdir().unwrap();
    fs::write(
        d.path().join("edges.txt"),
        "Sales Contracts\nContracts Law\nMusic Arts\n",
    )
    .unwrap();
    fs::write(d.path().join("starts.txt"), "Sales\nMusic\nGhost\n").unwrap();
    d
}

fn supercat(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_supercat"))
        .args(args)
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn test_exit_0_scores_to_stdout() {
    let d = workspace();
    let out = supercat(
        &d,
        &["score", "--edges", "edges.txt", "--starts", "starts.txt", "--targets", "Law,Arts", "-j", "2"],
    );
    assert_eq!(out.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&out.stdout);
    let mut lines: Vec<&str> = stdout.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Music> Arts: "));
    assert!(lines[1].starts_with("Sales> Arts: "));
}

#[test]
fn test_exit_2_invalid_config() {
    let d = workspace();
    fs::write(d.path().join("supercat.toml"), "[walk]\niterations = 0\n").unwrap();
    let out = supercat(&d, &["score", "--edges", "edges.txt", "--starts", "starts.txt"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("walk.iterations"));
}

#[test]
fn test_exit_2_bad_alpha_flag() {
    let d = workspace();
    let out = supercat(
        &d,
        &["score", "--edges", "edges.txt", "--starts", "starts.txt", "--alpha", "1.5"],
    );
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_exit_3_missing_edges() {
    let d = workspace();
    let out = supercat(&d, &["score", "--edges", "nope.txt", "--starts", "starts.txt"]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn test_order_lists_reachable_categories() {
    let d = workspace();
    let out = supercat(&d, &["order", "--edges", "edges.txt", "--root", "Law"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "Law\nContracts\nSales\n");
}

#[test]
fn test_order_unknown_root() {
    let d = workspace();
    let out = supercat(&d, &["order", "--edges", "edges.txt"]);
    assert_eq!(out.status.code(), Some(2));
}
