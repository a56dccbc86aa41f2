//! ECIES encryption backend implementation.
//!
//! secp256k1 ECIES (HKDF-SHA256, AES-256-GCM) via the `ecies` crate, the
//! scheme dotenvx uses for `encrypted:` values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::trace;
use zeroize::Zeroizing;

use super::{Cipher, KeyPair};
use crate::error::{CipherError, Result};

/// secp256k1 ECIES backend
pub struct Ecies;

impl Cipher for Ecies {
    fn name(&self) -> &'static str {
        "ecies-secp256k1"
    }

    fn encrypt(&self, plaintext: &str, public_key: &str) -> Result<String> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let public_key = parse_public_key(public_key)?;
        let encrypted = ::ecies::encrypt(&public_key, plaintext.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(format!("{:?}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");

        Ok(STANDARD.encode(encrypted))
    }

    fn decrypt(&self, ciphertext: &str, private_key: &str) -> Result<String> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let secret = parse_private_key(private_key)?;
        let encrypted = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| CipherError::DecryptionFailed(format!("invalid base64: {}", e)))?;

        let decrypted = Zeroizing::new(
            ::ecies::decrypt(&secret, &encrypted)
                .map_err(|e| CipherError::DecryptionFailed(format!("{:?}", e)))?,
        );

        trace!(plaintext_len = decrypted.len(), "decrypted");

        String::from_utf8(decrypted.to_vec())
            .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)).into())
    }

    fn generate_keypair(&self) -> KeyPair {
        let (secret, public) = ::ecies::utils::generate_keypair();
        let secret_bytes = Zeroizing::new(secret.serialize());

        KeyPair {
            public_key: hex::encode(public.serialize_compressed()),
            private_key: Zeroizing::new(hex::encode(&secret_bytes[..])),
        }
    }
}

/// Decode and validate a hex private key.
fn parse_private_key(private_key: &str) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = Zeroizing::new(
        hex::decode(private_key.trim())
            .map_err(|e| CipherError::InvalidPrivateKey(format!("not hex: {}", e)))?,
    );
    ::ecies::SecretKey::parse_slice(&bytes)
        .map_err(|e| CipherError::InvalidPrivateKey(format!("{:?}", e)))?;
    Ok(bytes)
}

/// Decode and validate a hex public key (compressed or uncompressed).
fn parse_public_key(public_key: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(public_key.trim())
        .map_err(|_| CipherError::InvalidPublicKey(public_key.to_string()))?;
    ::ecies::PublicKey::parse_slice(&bytes, None)
        .map_err(|_| CipherError::InvalidPublicKey(public_key.to_string()))?;
    Ok(bytes)
}
