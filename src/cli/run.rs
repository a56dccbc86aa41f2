//! Run command.
//!
//! Executes a command with decrypted entries injected as environment variables.

use zeroize::Zeroizing;

use crate::cli::SourceArgs;
use crate::error::Result;

/// Run a command with the loaded entries injected as environment variables.
pub fn execute(source: &SourceArgs, command: &[String]) -> Result<()> {
    let exit_code = run_with_entries(source, command)?;
    std::process::exit(exit_code);
}

fn run_with_entries(source: &SourceArgs, command: &[String]) -> Result<i32> {
    let Some((program, args)) = command.split_first() else {
        return Err(crate::error::Error::Other(
            "no command specified".to_string(),
        ));
    };

    let dotenv = source.loader()?.load()?;

    let mut cmd = std::process::Command::new(program);
    cmd.args(args);

    for entry in dotenv.into_entries() {
        let value = Zeroizing::new(entry.value);
        cmd.env(&entry.key, value.as_str());
    }

    let status = cmd.status()?;
    Ok(status.code().unwrap_or(1))
}
