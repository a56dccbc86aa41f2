//! Error types.
//!
//! Errors are grouped by concern and wrapped by the top-level [`Error`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while loading and decrypting a configuration file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed entry at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("failed to decrypt {key}: {reason}")]
    DecryptionFailed { key: String, reason: String },
}

/// Private key resolution errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("no {var} found in environment variables or .env.keys files (searched: {})", format_searched(.searched))]
    MissingPrivateKey { var: String, searched: Vec<PathBuf> },
}

fn format_searched(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "none".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cryptographic primitive errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// CLI settings file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors binding an entry set onto a typed structure.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("invalid {ty} value for {key}")]
    InvalidValue { key: String, ty: &'static str },

    #[error("{0}")]
    Message(String),
}

impl serde::de::Error for BindError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        BindError::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
