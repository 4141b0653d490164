//! Integration tests for the vulnreport binary's exit statuses.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vulnreport"))
        .args(args)
        .env_remove("VULNREPORT_CONFIG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn test_missing_params_exit_127() {
    let output = run(&["scan.docx", "out"]);

    assert_eq!(output.status.code(), Some(127));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Incorrect run params."));
}

#[test]
fn test_no_params_exit_127() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(127));
}

#[test]
fn test_unknown_type_exits_1() {
    let output = run(&["scan.docx", "out", "pdf"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown document type 'pdf'"));
}

#[test]
fn test_version_subcommand() {
    let output = run(&["version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
