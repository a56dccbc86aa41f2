//! Command-line interface.

pub mod encrypt;
pub mod get;
pub mod keypair;
pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::{LoadOverrides, Settings};
use crate::core::loader::Loader;

/// Envcrypt - Load .env and properties files with encrypted values.
#[derive(Parser)]
#[command(
    name = "envcrypt",
    about = "Load .env and properties files with encrypted values",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a new key pair
    Keypair {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encrypt a value for a public key
    Encrypt {
        /// Public key (hex)
        #[arg(short = 'k', long, env = "DOTENV_PUBLIC_KEY")]
        public_key: String,
        /// Plaintext value
        value: String,
    },

    /// Print decrypted entries
    Get {
        /// Print only this key
        key: Option<String>,
        #[command(flatten)]
        source: SourceArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a command with decrypted entries injected as env vars
    Run {
        #[command(flatten)]
        source: SourceArgs,
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
}

/// Options selecting and loading the configuration file.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Configuration file (default: .env)
    #[arg(short, long, env = "ENVCRYPT_FILE")]
    pub file: Option<PathBuf>,

    /// Private key (hex); skips the key search
    #[arg(long)]
    pub private_key: Option<String>,

    /// Treat a missing file as empty
    #[arg(long)]
    pub ignore_missing: bool,

    /// Skip malformed lines
    #[arg(long)]
    pub ignore_malformed: bool,
}

impl SourceArgs {
    /// Loader combining these flags with `.envcrypt.toml`.
    pub fn loader(&self) -> crate::error::Result<Loader> {
        let settings = Settings::load()?;
        let overrides = LoadOverrides {
            file: self.file.clone(),
            private_key: self.private_key.clone(),
            ignore_missing: self.ignore_missing,
            ignore_malformed: self.ignore_malformed,
        };
        Ok(settings.loader(&overrides))
    }
}

/// Dispatch a parsed command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Keypair { json } => keypair::execute(json),
        Encrypt { public_key, value } => encrypt::execute(&public_key, &value),
        Get { key, source, json } => get::execute(key.as_deref(), &source, json),
        Run { source, command } => run::execute(&source, &command),
    }
}
