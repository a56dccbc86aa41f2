//! Envcrypt - Load `.env` and properties files with encrypted values.
//!
//! Values written as `encrypted:<ciphertext>` are decrypted at load time with
//! a secp256k1 private key kept outside version control.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── keypair       # Generate a key pair
//! │   ├── encrypt       # Encrypt a single value
//! │   ├── get           # Print decrypted entries
//! │   └── run           # Run with decrypted entries injected
//! └── core/             # Core library components
//!     ├── loader        # Load builder and Dotenv result
//!     ├── decrypt       # Decryption pipeline
//!     ├── resolver      # Private key source precedence
//!     ├── keystore      # ~/.dotenvx/.env.keys.json reader
//!     ├── profile       # Profile extraction from filenames
//!     ├── cipher/       # Encryption backends
//!     │   ├── mod       # Cipher trait
//!     │   └── ecies     # secp256k1 ECIES implementation
//!     ├── domain/       # Entry sets, .env and properties parsing
//!     ├── bind          # serde binding onto typed structs
//!     └── config        # .envcrypt.toml settings
//! ```
//!
//! # Key Resolution
//!
//! The first non-empty key wins:
//!
//! 1. key passed to [`Loader::private_key`]
//! 2. `~/.dotenvx/.env.keys.json`, by the public key a properties file declares
//! 3. `DOTENV_PRIVATE_KEY` or `DOTENV_PRIVATE_KEY_<PROFILE>`
//! 4. `.env.keys` next to the file, in the working directory, then in HOME
//!
//! # Example
//!
//! ```no_run
//! let dotenv = envcrypt::load()?;
//! for entry in &dotenv {
//!     println!("{}", entry.key);
//! }
//! # Ok::<(), envcrypt::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::bind::KeyNaming;
pub use crate::core::domain::{Entries, Entry};
pub use crate::core::loader::{Dotenv, Loader};
pub use crate::error::{Error, Result};

/// Load and decrypt `./.env` with default settings.
///
/// # Errors
///
/// See [`Loader::load`].
pub fn load() -> Result<Dotenv> {
    Loader::new().load()
}
