//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("keypair"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    t.cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::new();
    t.write(".env", "A=1\n");

    let output = t.cmd().args(["--verbose", "get", "A"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "1");
}

#[test]
fn test_missing_private_key_reports_variable_and_hint() {
    let t = Test::new();
    t.write_encrypted(".env.staging", &[("TOKEN", "value")]);

    let output = t.get(&["--file", ".env.staging"]);
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "✗");
    assert_stderr_contains(&output, "DOTENV_PRIVATE_KEY_STAGING");
    assert_stderr_contains(&output, "→ set DOTENV_PRIVATE_KEY_STAGING");
    assert_stdout_empty(&output);
}

#[test]
fn test_wrong_private_key_names_entry() {
    let t = Test::new();
    t.write_encrypted(".env", &[("TOKEN", "value")]);

    let output = t.get(&["--private-key", KNOWN_PRIVATE_KEY]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to decrypt TOKEN");
}

#[test]
fn test_missing_file() {
    let t = Test::new();

    let output = t.get(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "file not found");
    assert_stderr_contains(&output, "--ignore-missing");
    assert_stdout_empty(&output);
}

#[test]
fn test_malformed_file() {
    let t = Test::new();
    t.write(".env", "GOOD=1\nnot a valid line\n");

    let output = t.get(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "line 2");

    let output = t.get(&["--ignore-malformed"]);
    assert_success(&output);
    assert_stdout_contains(&output, "GOOD=1");
}

#[test]
fn test_invalid_settings_file() {
    let t = Test::new();
    t.write(".env", "A=1\n");
    t.write(".envcrypt.toml", "[load\n");

    let output = t.get(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "settings");
}

#[test]
fn test_debug_logs_never_show_plaintext() {
    let t = Test::new();
    let private_key = t.write_encrypted(".env", &[("TOKEN", "plaintext-marker")]);

    let output = t
        .cmd()
        .env("ENVCRYPT_LOG", "envcrypt=trace")
        .args(["get", "--private-key", private_key.as_str(), "--json"])
        .output()
        .unwrap();
    assert_success(&output);
    let err = stderr(&output);
    assert!(!err.contains("plaintext-marker"));
    assert!(!err.contains(private_key.as_str()));
}
