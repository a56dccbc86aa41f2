//! Cryptographic operations.
//!
//! Provides the encryption/decryption abstraction and its ECIES implementation.
//! Values are encrypted for a secp256k1 public key and decrypted with the
//! matching private key; both keys travel as hex strings and ciphertext as base64.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use zeroize::Zeroizing;

use crate::core::constants::ENCRYPTED_PREFIX;
use crate::core::types::{Ciphertext, PrivateKeyHex, PublicKeyHex};
use crate::error::Result;

mod ecies;

pub use self::ecies::Ecies;

/// A freshly generated key pair.
pub struct KeyPair {
    /// Compressed public key, hex encoded
    pub public_key: PublicKeyHex,
    /// Private key, hex encoded
    pub private_key: Zeroizing<PrivateKeyHex>,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Cryptographic backend trait.
///
/// Abstracts the asymmetric primitives so the decryption pipeline never
/// depends on a concrete curve or library.
pub trait Cipher {
    /// Encrypt plaintext for a public key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPublicKey` or `CipherError::EncryptionFailed`.
    fn encrypt(&self, plaintext: &str, public_key: &str) -> Result<Ciphertext>;

    /// Decrypt ciphertext (without the `encrypted:` prefix) with a private key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPrivateKey` if the key is malformed, or
    /// `CipherError::DecryptionFailed` for corrupt ciphertext or the wrong key.
    fn decrypt(&self, ciphertext: &str, private_key: &str) -> Result<String>;

    /// Generate a new key pair.
    fn generate_keypair(&self) -> KeyPair;

    /// Backend name for display/logging.
    fn name(&self) -> &'static str;
}

/// Generate a new secp256k1 key pair.
pub fn generate_keypair() -> KeyPair {
    Ecies.generate_keypair()
}

/// Encrypt plaintext for a public key using ECIES.
///
/// # Errors
///
/// Returns `CipherError` if the key is invalid or encryption fails.
pub fn encrypt(plaintext: &str, public_key: &str) -> Result<Ciphertext> {
    Ecies.encrypt(plaintext, public_key)
}

/// Decrypt ECIES ciphertext with a private key.
///
/// # Errors
///
/// Returns `CipherError` if the key is invalid or decryption fails.
pub fn decrypt(ciphertext: &str, private_key: &str) -> Result<String> {
    Ecies.decrypt(ciphertext, private_key)
}

/// Encrypt plaintext and tag it with the `encrypted:` prefix.
///
/// # Errors
///
/// Returns `CipherError` if the key is invalid or encryption fails.
pub fn encrypt_value(plaintext: &str, public_key: &str) -> Result<String> {
    Ok(format!("{}{}", ENCRYPTED_PREFIX, encrypt(plaintext, public_key)?))
}
