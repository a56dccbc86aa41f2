//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables from the outer environment that would leak into key resolution.
const ISOLATED_VARS: &[&str] = &[
    "DOTENV_PRIVATE_KEY",
    "DOTENV_PRIVATE_KEY_PRODUCTION",
    "DOTENV_PRIVATE_KEY_STAGING",
    "DOTENV_PUBLIC_KEY",
    "ENVCRYPT_FILE",
    "ENVCRYPT_LOG",
];

impl Test {
    /// Create an envcrypt command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - Outer key variables removed
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envcrypt").expect("failed to find envcrypt binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `envcrypt keypair --json`.
    pub fn keypair_json(&self) -> Output {
        self.cmd()
            .args(["keypair", "--json"])
            .output()
            .expect("failed to run envcrypt keypair")
    }

    /// Shortcut for `envcrypt encrypt`.
    pub fn encrypt(&self, public_key: &str, value: &str) -> Output {
        self.cmd()
            .args(["encrypt", "--public-key", public_key, value])
            .output()
            .expect("failed to run envcrypt encrypt")
    }

    /// Shortcut for `envcrypt get` with extra arguments.
    pub fn get(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("get")
            .args(args)
            .output()
            .expect("failed to run envcrypt get")
    }

    /// Shortcut for `envcrypt get KEY` with extra arguments.
    pub fn get_key(&self, args: &[&str], key: &str) -> Output {
        self.cmd()
            .arg("get")
            .arg(key)
            .args(args)
            .output()
            .expect("failed to run envcrypt get")
    }

    /// Shortcut for `envcrypt run -- CMD...`.
    pub fn run(&self, args: &[&str], command: &[&str]) -> Output {
        self.cmd()
            .arg("run")
            .args(args)
            .arg("--")
            .args(command)
            .output()
            .expect("failed to run envcrypt run")
    }
}
