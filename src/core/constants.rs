//! Constants used throughout envcrypt.
//!
//! Centralizes magic strings and well-known file locations.

/// Prefix marking a value as encrypted (`encrypted:<ciphertext>`).
pub const ENCRYPTED_PREFIX: &str = "encrypted:";

/// Environment variable holding the private key for unprofiled files.
pub const PRIVATE_KEY_VAR: &str = "DOTENV_PRIVATE_KEY";

/// Default configuration file name (.env).
pub const ENV_FILE: &str = ".env";

/// Marker separating the base name from the profile in `.env.<profile>`.
pub const ENV_PROFILE_MARKER: &str = ".env.";

/// Extension identifying properties files.
pub const PROPERTIES_EXTENSION: &str = ".properties";

/// Key prefix declaring the public key inside a properties file.
pub const PUBLIC_KEY_PREFIX: &str = "dotenv.public.key";

/// Private key file name, searched in the source, current and home directories.
pub const KEYS_FILE: &str = ".env.keys";

/// Global key store directory relative to HOME (~/.dotenvx).
pub const GLOBAL_STORE_DIR: &str = ".dotenvx";

/// Global key store file name inside [`GLOBAL_STORE_DIR`].
pub const GLOBAL_STORE_FILE: &str = ".env.keys.json";

/// Optional CLI settings file name.
pub const SETTINGS_FILE: &str = ".envcrypt.toml";
