//! Tests for `envcrypt encrypt`.

use crate::support::*;

#[test]
fn test_encrypt_prints_prefixed_value() {
    let t = Test::new();

    let output = t.encrypt(KNOWN_PUBLIC_KEY, "hello");
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.starts_with("encrypted:"));
    assert_output_excludes(&output, "hello");
}

#[test]
fn test_encrypt_then_get_roundtrip() {
    let t = Test::new();

    let output = t.encrypt(KNOWN_PUBLIC_KEY, "round trip value");
    assert_success(&output);
    let encrypted = stdout(&output).trim().to_string();

    t.write(".env", &format!("GREETING=\"{}\"\n", encrypted));

    assert_value(
        &t,
        &["--private-key", KNOWN_PRIVATE_KEY],
        "GREETING",
        "round trip value",
    );
}

#[test]
fn test_encrypt_reads_public_key_from_env() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("DOTENV_PUBLIC_KEY", KNOWN_PUBLIC_KEY)
        .args(["encrypt", "value"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted:");
}

#[test]
fn test_encrypt_invalid_public_key() {
    let t = Test::new();

    let output = t.encrypt(INVALID_PUBLIC_KEY, "value");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid public key");
}
