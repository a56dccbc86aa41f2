//! Tests for `envcrypt get`.

use crate::support::*;

#[test]
fn test_get_plain_file() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t.get(&[]);
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.contains("SIMPLE=value\n"));
    assert!(out.contains("QUOTED=\"quoted value\"\n"));
    assert!(out.contains("EXPORTED=yes\n"));
}

#[test]
fn test_get_decrypts_with_key_file() {
    let t = Test::new();
    let private_key = t.write_encrypted(".env", STANDARD_SECRETS);
    t.write(".env.keys", &format!("DOTENV_PRIVATE_KEY={}\n", private_key));

    for (key, value) in STANDARD_SECRETS {
        assert_value(&t, &[], key, value);
    }
}

#[test]
fn test_get_decrypts_with_home_key_file() {
    let t = Test::new();
    let private_key = t.write_encrypted(".env", STANDARD_SECRETS);
    t.write_home(".env.keys", &format!("DOTENV_PRIVATE_KEY={}\n", private_key));

    assert_value(&t, &[], "API_KEY", "sk-test-12345");
}

#[test]
fn test_get_profile_uses_profile_variable() {
    let t = Test::new();
    let private_key = t.write_encrypted(".env.production", STANDARD_SECRETS);

    let output = t
        .cmd()
        .env("DOTENV_PRIVATE_KEY_PRODUCTION", &private_key)
        .args(["get", "DATABASE_URL", "--file", ".env.production"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "postgres://localhost/mydb");
}

#[test]
fn test_get_file_from_environment_variable() {
    let t = Test::new();
    t.write("config/.env.local", "FROM_ENV_FILE=1\n");

    let output = t
        .cmd()
        .env("ENVCRYPT_FILE", "config/.env.local")
        .args(["get", "FROM_ENV_FILE"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "1");
}

#[test]
fn test_get_file_from_settings() {
    let t = Test::new();
    t.write("config/app.env", "FROM_SETTINGS=yes\n");
    t.write(".envcrypt.toml", "[load]\nfile = \"config/app.env\"\n");

    assert_value(&t, &[], "FROM_SETTINGS", "yes");
}

#[test]
fn test_get_json_preserves_order() {
    let t = Test::new();
    let private_key = t.write_encrypted(".env", STANDARD_SECRETS);

    let output = t.get(&["--json", "--private-key", private_key.as_str()]);
    assert_success(&output);

    let out = stdout(&output);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["JWT_SECRET"], "super secret jwt token");

    let db = out.find("DATABASE_URL").unwrap();
    let api = out.find("API_KEY").unwrap();
    let jwt = out.find("JWT_SECRET").unwrap();
    assert!(db < api && api < jwt);
}

#[test]
fn test_get_properties_with_global_store() {
    let t = Test::new();

    let output = t.encrypt(KNOWN_PUBLIC_KEY, "s3cr3t");
    assert_success(&output);
    let encrypted = stdout(&output).trim().to_string();

    t.write(
        "application-production.properties",
        &format!(
            "dotenv.public.key={}\ndb.password={}\n",
            KNOWN_PUBLIC_KEY, encrypted
        ),
    );
    t.write_home(
        ".dotenvx/.env.keys.json",
        &format!(
            r#"{{ "{}": {{ "private_key": "{}" }} }}"#,
            KNOWN_PUBLIC_KEY, KNOWN_PRIVATE_KEY
        ),
    );

    assert_value(
        &t,
        &["--file", "application-production.properties"],
        "db.password",
        "s3cr3t",
    );
}

#[test]
fn test_get_missing_key_name() {
    let t = Test::new();
    t.write(".env", "A=1\n");

    let output = t.get_key(&[], "B");
    assert_failure(&output);
    assert_stderr_contains(&output, "key not found: B");
}
