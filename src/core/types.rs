//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A configuration entry key (e.g., DATABASE_URL, server.port).
pub type EntryKey = String;

/// An encrypted value body: base64 ECIES ciphertext without the `encrypted:` prefix.
pub type Ciphertext = String;

/// A secp256k1 public key in hex form (compressed or uncompressed).
pub type PublicKeyHex = String;

/// A secp256k1 private key in hex form.
pub type PrivateKeyHex = String;

/// An environment name extracted from a filename (e.g., production).
pub type Profile = String;
