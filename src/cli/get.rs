//! Get command.
//!
//! Prints one decrypted value, or every entry as `.env` lines or JSON.

use serde_json::{Map, Value};

use crate::cli::SourceArgs;
use crate::core::domain::Env;
use crate::error::{Error, Result};

/// Load the configured file and print its decrypted entries.
pub fn execute(key: Option<&str>, source: &SourceArgs, json: bool) -> Result<()> {
    let dotenv = source.loader()?.load()?;

    if let Some(key) = key {
        let value = dotenv
            .get(key)
            .ok_or_else(|| Error::Other(format!("key not found: {}", key)))?;
        if json {
            println!("{}", Value::String(value.to_string()));
        } else {
            println!("{}", value);
        }
        return Ok(());
    }

    if json {
        let map: Map<String, Value> = dotenv
            .iter()
            .map(|e| (e.key.clone(), Value::String(e.value.clone())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&Value::Object(map))?);
    } else {
        let path = dotenv.path().to_path_buf();
        print!("{}", Env::from_entries(dotenv.into_entries(), path));
    }

    Ok(())
}
