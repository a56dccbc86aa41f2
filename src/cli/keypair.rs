//! Keypair command.

use serde_json::json;

use crate::cli::output;
use crate::core::cipher;
use crate::core::constants::PRIVATE_KEY_VAR;
use crate::error::Result;

/// Generate a key pair and print it.
pub fn execute(json: bool) -> Result<()> {
    let pair = cipher::generate_keypair();

    if json {
        let value = json!({
            "public_key": pair.public_key,
            "private_key": pair.private_key.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("DOTENV_PUBLIC_KEY={}", pair.public_key);
        println!("{}={}", PRIVATE_KEY_VAR, pair.private_key.as_str());
        if console::user_attended() {
            output::warn("store the private key outside version control");
        }
    }

    Ok(())
}
