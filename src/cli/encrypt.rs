//! Encrypt command.

use crate::core::cipher;
use crate::error::Result;

/// Encrypt one value and print it as `encrypted:<ciphertext>`.
pub fn execute(public_key: &str, value: &str) -> Result<()> {
    let encrypted = cipher::encrypt_value(value, public_key)?;
    println!("{}", encrypted);
    Ok(())
}
