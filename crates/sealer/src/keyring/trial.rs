//! Multi-key trial decryption.

use common::SealError;
use tracing::debug;
use zeroize::Zeroizing;

use super::ring::RingKey;
use crate::crypto::{cipher, kdf};

/// The key actually handed to the cipher for `key` under `salt`.
///
/// An empty salt means "no salt requested" and uses the ring key as-is.
pub fn working_key(key: &RingKey, salt: &str) -> Zeroizing<Vec<u8>> {
    if salt.is_empty() {
        Zeroizing::new(key.as_bytes().to_vec())
    } else {
        kdf::derive(key.as_bytes(), salt.as_bytes())
    }
}

/// Recover `blob` with the first key in `keys` that authenticates it.
///
/// `keys` is ordered oldest first, as returned by
/// [`KeyRing::snapshot`](super::KeyRing::snapshot); the walk runs newest
/// first so the current key is tried before any older one. Every per-key
/// failure, including a key of the wrong length, moves on to the next key.
/// Authenticated encryption allows at most one key to succeed, so the first
/// success is the only one.
///
/// # Errors
///
/// Returns [`SealError::NoKeysAvailable`] if `keys` is empty.
/// Returns [`SealError::DecryptionFailed`] if no key recovers the plaintext.
pub fn trial_decrypt(keys: &[RingKey], salt: &str, blob: &[u8]) -> Result<Vec<u8>, SealError> {
    if keys.is_empty() {
        return Err(SealError::NoKeysAvailable);
    }

    for (age, key) in keys.iter().rev().enumerate() {
        let key = working_key(key, salt);
        match cipher::decrypt(blob, &key) {
            Ok(plaintext) => {
                debug!(age, "unsealed with ring key");
                return Ok(plaintext);
            }
            Err(e) => debug!(age, error = %e, "ring key did not unseal"),
        }
    }

    Err(SealError::DecryptionFailed {
        attempted: keys.len(),
    })
}
