//! Tests for `envcrypt run`.

use crate::support::*;

#[test]
fn test_run_injects_decrypted_vars() {
    let t = Test::new();
    let private_key = t.write_encrypted(".env", &[("INJECTED_VAR", "injected_value")]);

    #[cfg(unix)]
    {
        let output = t.run(
            &["--private-key", private_key.as_str()],
            &["sh", "-c", "echo $INJECTED_VAR"],
        );
        assert_success(&output);
        assert_stdout_contains(&output, "injected_value");
    }

    #[cfg(windows)]
    {
        let output = t.run(
            &["--private-key", private_key.as_str()],
            &["cmd", "/c", "echo %INJECTED_VAR%"],
        );
        assert_success(&output);
        assert_stdout_contains(&output, "injected_value");
    }
}

#[test]
fn test_run_with_missing_file_ignored() {
    let t = Test::new();

    #[cfg(unix)]
    {
        let output = t.run(&["--ignore-missing"], &["echo", "hello"]);
        assert_success(&output);
        assert_stdout_contains(&output, "hello");
    }

    #[cfg(windows)]
    {
        let output = t.run(&["--ignore-missing"], &["cmd", "/c", "echo hello"]);
        assert_success(&output);
        assert_stdout_contains(&output, "hello");
    }
}

#[test]
fn test_run_command_exit_code_passthrough() {
    let t = Test::new();
    t.write(".env", "A=1\n");

    #[cfg(unix)]
    {
        let output = t.run(&[], &["sh", "-c", "exit 42"]);
        assert_eq!(output.status.code(), Some(42));
    }

    #[cfg(windows)]
    {
        let output = t.run(&[], &["cmd", "/c", "exit 42"]);
        assert_eq!(output.status.code(), Some(42));
    }
}

#[test]
fn test_run_without_key_does_not_spawn() {
    let t = Test::new();
    t.write_encrypted(".env", &[("TOKEN", "value")]);

    let output = t.run(&[], &["echo", "should-not-run"]);
    assert_failure(&output);
    assert_output_excludes(&output, "should-not-run");
}

#[test]
fn test_run_requires_command() {
    let t = Test::new();

    let output = t.cmd().arg("run").output().unwrap();
    assert_failure(&output);
}
