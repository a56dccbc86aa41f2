//! Envcrypt - Load .env and properties files with encrypted values.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envcrypt::cli::output;
use envcrypt::cli::{execute, Cli};
use envcrypt::error::{Error, KeyError, LoadError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("ENVCRYPT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envcrypt=debug")
        } else {
            EnvFilter::new("envcrypt=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        // Format error with suggestion if available
        let suggestion = match &e {
            Error::Key(KeyError::MissingPrivateKey { var, .. }) => {
                Some(format!("set {} or add it to a .env.keys file", var))
            }
            Error::Load(LoadError::NotFound(_)) => {
                Some("pass --file, or --ignore-missing to continue without it".to_string())
            }
            Error::Load(LoadError::Malformed { .. }) => {
                Some("pass --ignore-malformed to skip invalid lines".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
