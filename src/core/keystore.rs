//! Global key store reader.
//!
//! Reads `~/.dotenvx/.env.keys.json`, a per-user cache mapping public keys to
//! private keys. Two shapes exist on disk:
//!
//! ```text
//! legacy:  { "<public key>": { "private_key": "..." } }
//! current: { "version": 1, "keys": { "<public key>": { "private_key": "..." } } }
//! ```
//!
//! Any read or parse failure is a miss. The store is never written.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{GLOBAL_STORE_DIR, GLOBAL_STORE_FILE};

/// Outcome of reading the store file.
#[derive(Debug)]
pub enum StoreRead {
    /// No file at the store path
    Missing,
    /// File exists but could not be read or parsed
    Unreadable(String),
    /// Normalized public key → key pair mapping
    Loaded(Map<String, Value>),
}

/// Read-only view of the global key store.
#[derive(Debug, Clone)]
pub struct GlobalKeyStore {
    path: PathBuf,
}

impl GlobalKeyStore {
    /// Store under an explicit home directory.
    pub fn in_home(home: &Path) -> Self {
        Self::at(home.join(GLOBAL_STORE_DIR).join(GLOBAL_STORE_FILE))
    }

    /// Store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and normalize the store.
    pub fn read(&self) -> StoreRead {
        if !self.path.exists() {
            return StoreRead::Missing;
        }

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => Zeroizing::new(c),
            Err(e) => return StoreRead::Unreadable(e.to_string()),
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => StoreRead::Loaded(normalize(map)),
            Ok(_) => StoreRead::Unreadable("top-level value is not an object".to_string()),
            Err(e) => StoreRead::Unreadable(e.to_string()),
        }
    }

    /// Private key for a public key, with any `{...}` artifact trimmed.
    pub fn lookup(&self, public_key: &str) -> Option<Zeroizing<String>> {
        let mut keys = match self.read() {
            StoreRead::Loaded(keys) => keys,
            StoreRead::Missing => {
                debug!(path = %self.path.display(), "global key store not present");
                return None;
            }
            StoreRead::Unreadable(reason) => {
                debug!(path = %self.path.display(), %reason, "global key store unreadable, ignoring");
                return None;
            }
        };

        let found = match keys.get(public_key) {
            Some(Value::Object(pair)) => match pair.get("private_key") {
                Some(Value::String(raw)) => Some(Zeroizing::new(trim_private_key(raw).to_string())),
                _ => None,
            },
            _ => None,
        };

        scrub(&mut keys);

        debug!(found = found.is_some(), "global key store lookup");
        found.filter(|k| !k.is_empty())
    }
}

/// Descend into `keys` when the store uses the versioned shape.
fn normalize(mut map: Map<String, Value>) -> Map<String, Value> {
    if !(map.contains_key("version") && map.contains_key("keys")) {
        return map;
    }
    match map.remove("keys") {
        Some(Value::Object(keys)) => keys,
        _ => Map::new(),
    }
}

/// Overwrite private key strings before the parsed store is dropped.
fn scrub(keys: &mut Map<String, Value>) {
    for pair in keys.values_mut() {
        if let Value::Object(pair) = pair {
            if let Some(Value::String(raw)) = pair.get_mut("private_key") {
                zeroize::Zeroize::zeroize(raw);
            }
        }
    }
}

/// Strip an extraneous `{...}` suffix from a private key.
pub fn trim_private_key(raw: &str) -> &str {
    match raw.find('{') {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}
