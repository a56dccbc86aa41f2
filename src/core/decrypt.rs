//! Decryption pipeline.
//!
//! Rewrites an entry set so that every `encrypted:` value becomes plaintext.
//! The resolver is only consulted when at least one value is encrypted, and
//! any failure aborts the whole set.

use tracing::{debug, trace};

use crate::core::cipher::Cipher;
use crate::core::domain::Entries;
use crate::core::resolver::{Environment, Resolver};
use crate::error::{LoadError, Result};

/// Pipeline phases, logged at trace level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scanning,
    KeyResolving,
    Decrypting,
    Done,
    Failed,
}

fn enter(phase: Phase) {
    trace!(?phase, "decrypt pipeline");
}

/// Decrypt every encrypted entry.
///
/// Entries without the `encrypted:` prefix pass through unchanged and the
/// original order is kept.
///
/// # Errors
///
/// Returns `KeyError::MissingPrivateKey` if no key resolves, or
/// `LoadError::DecryptionFailed` naming the first entry the cipher rejects.
pub fn decrypt_all<E, C>(entries: Entries, resolver: &mut Resolver<E>, cipher: &C) -> Result<Entries>
where
    E: Environment,
    C: Cipher + ?Sized,
{
    enter(Phase::Scanning);
    let encrypted = entries.iter().filter(|e| e.is_encrypted()).count();
    if encrypted == 0 {
        enter(Phase::Done);
        return Ok(entries);
    }

    enter(Phase::KeyResolving);
    let private_key = match resolver.resolve() {
        Some(key) => key,
        None => {
            enter(Phase::Failed);
            return Err(resolver.missing_key_error().into());
        }
    };

    enter(Phase::Decrypting);
    debug!(encrypted, cipher = cipher.name(), "decrypting entries");

    let mut decrypted = Entries::new();
    for entry in entries {
        if !entry.is_encrypted() {
            decrypted.insert(entry.key, entry.value);
            continue;
        }

        let ciphertext = entry.ciphertext().unwrap_or_default();
        match cipher.decrypt(ciphertext, private_key) {
            Ok(plaintext) => {
                trace!(key = %entry.key, "entry decrypted");
                decrypted.insert(entry.key, plaintext);
            }
            Err(e) => {
                enter(Phase::Failed);
                return Err(LoadError::DecryptionFailed {
                    key: entry.key,
                    reason: e.to_string(),
                }
                .into());
            }
        }
    }

    enter(Phase::Done);
    Ok(decrypted)
}
