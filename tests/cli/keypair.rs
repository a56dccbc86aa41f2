//! Tests for `envcrypt keypair`.

use crate::support::*;

#[test]
fn test_keypair_plain_output() {
    let t = Test::new();

    let output = t.cmd().arg("keypair").output().unwrap();
    assert_success(&output);

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("DOTENV_PUBLIC_KEY="));
    assert!(lines[1].starts_with("DOTENV_PRIVATE_KEY="));
}

#[test]
fn test_keypair_json_is_valid_hex() {
    let t = Test::new();

    let output = t.keypair_json();
    assert_success(&output);

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let public_key = value["public_key"].as_str().unwrap();
    let private_key = value["private_key"].as_str().unwrap();

    assert_eq!(public_key.len(), 66);
    assert_eq!(private_key.len(), 64);
    assert!(public_key.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(private_key.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_keypairs_are_unique() {
    let t = Test::new();

    let first = stdout(&t.keypair_json());
    let second = stdout(&t.keypair_json());
    assert_ne!(first, second);
}
