//! Runs the 'harmony' binary on small instances.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_harmony"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start harmony");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for harmony")
}

const TRIANGLE: &str = "3 3\n0 1 1\n1 2 1\n2 0 1\n";
const SQUARE: &str = "4 4\n0 1 1\n1 2 1\n2 3 1\n3 0 1\n";

#[test]
fn test_stdout_is_only_the_verdict() {
    for (text, verdict) in [(TRIANGLE, "0\n"), (SQUARE, "1\n"), ("2 0\n", "1\n")] {
        let output = run(&["--log-level", "trace", "-v"], text);
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), verdict);
        // The log records went to stderr instead.
        assert!(String::from_utf8_lossy(&output.stderr).contains("instance:"));
    }
}

#[test]
fn test_union_find_method() {
    let output = run(&["--method", "union-find"], TRIANGLE);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0\n");
    let output = run(&["-m", "union-find"], SQUARE);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n");
}

#[test]
fn test_witness_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("witness.yaml");
    let witness = path.to_str().expect("utf-8 path");

    let output = run(&["--witness", witness], SQUARE);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n");
    let rows: Vec<serde_yaml::Value> =
        serde_yaml::from_str(&std::fs::read_to_string(&path).expect("read")).expect("yaml");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1]["group"], serde_yaml::Value::from("B"));

    let other = dir.path().join("none.yaml");
    let output = run(&["--witness", other.to_str().expect("utf-8 path")], TRIANGLE);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0\n");
    assert!(!other.exists());
}

#[test]
fn test_malformed_input_fails() {
    let output = run(&[], "3 2\n0 1 0\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MissingEdges"));
}

fn write_config(dir: &Path, logs: &Path) -> String {
    let path = dir.join("settings.yaml");
    std::fs::write(&path, format!("log_level: info\nlog_directory: {}\n", logs.display()))
        .expect("write config");
    path.to_str().expect("utf-8 path").to_string()
}

#[test]
fn test_verbose_duplicates_file_logs_to_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), &dir.path().join("logs"));

    let quiet = run(&["--config", &config], SQUARE);
    assert_eq!(String::from_utf8_lossy(&quiet.stdout), "1\n");
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("instance:"));

    let verbose = run(&["--config", &config, "-v"], SQUARE);
    assert_eq!(String::from_utf8_lossy(&verbose.stdout), "1\n");
    assert!(String::from_utf8_lossy(&verbose.stderr).contains("instance:"));
}
