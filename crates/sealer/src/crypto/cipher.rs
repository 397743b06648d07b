//! AES-256-GCM-SIV encryption and decryption of sealed payloads.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) is authenticated and
//! nonce-misuse-resistant. Decrypting under the wrong key fails the tag check,
//! which is what lets the key ring try keys one after another.
//!
//! **Do NOT substitute an unauthenticated mode.** Trial decryption relies on a
//! wrong key failing loudly rather than yielding garbage.

use aes_gcm_siv::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256GcmSiv, Nonce,
};
use common::SealError;
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the AES-GCM-SIV authentication tag.
pub const TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes, got {actual}")]
    InvalidKeyLength { actual: usize },

    /// Wrong key, tampered data, or a blob too short to hold nonce and tag.
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl From<CipherError> for SealError {
    fn from(e: CipherError) -> Self {
        match e {
            CipherError::InvalidKeyLength { actual } => SealError::InvalidKeyLength {
                expected: KEY_LEN,
                actual,
            },
            CipherError::AuthenticationFailed => SealError::AuthenticationFailed,
        }
    }
}

/// Encrypt `plaintext` under `key`.
///
/// A random 96-bit nonce is generated per call via the OS CSPRNG and prepended
/// to the output, so the returned blob is `nonce || ciphertext || tag` and
/// needs nothing else to decrypt.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AuthenticationFailed`] on an internal AEAD error
/// (unreachable with a valid key and nonce).
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CipherError::AuthenticationFailed)?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a blob produced by [`encrypt`].
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AuthenticationFailed`] if authentication fails or the
/// blob is too short.
pub fn decrypt(blob: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(CipherError::AuthenticationFailed);
    }
    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CipherError::AuthenticationFailed)
}

fn build_cipher(key: &[u8]) -> Result<Aes256GcmSiv, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength { actual: key.len() });
    }
    Aes256GcmSiv::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength {
        actual: key.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key() -> Vec<u8> {
        let mut key = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = random_key();
        let plaintext = b"123-45-6789";
        let blob = encrypt(plaintext, &key).unwrap();
        assert_eq!(blob.len(), NONCE_LEN + plaintext.len() + TAG_LEN);
        assert_eq!(decrypt(&blob, &key).unwrap(), plaintext);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = random_key();
        let blob = encrypt(b"", &key).unwrap();
        assert!(decrypt(&blob, &key).unwrap().is_empty());
    }

    #[test]
    fn fresh_nonce_per_call() {
        let key = random_key();
        assert_ne!(encrypt(b"same", &key).unwrap(), encrypt(b"same", &key).unwrap());
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let blob = encrypt(b"secret", &random_key()).unwrap();
        assert_eq!(
            decrypt(&blob, &random_key()),
            Err(CipherError::AuthenticationFailed)
        );
    }

    #[test]
    fn invalid_key_length_rejected() {
        assert_eq!(
            encrypt(b"x", &[0u8; 16]),
            Err(CipherError::InvalidKeyLength { actual: 16 })
        );
        assert_eq!(
            decrypt(&[0u8; 64], &[0u8; 33]),
            Err(CipherError::InvalidKeyLength { actual: 33 })
        );
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let key = random_key();
        let mut blob = encrypt(b"tamper me", &key).unwrap();
        blob[NONCE_LEN] ^= 0xFF;
        assert_eq!(decrypt(&blob, &key), Err(CipherError::AuthenticationFailed));
    }

    #[test]
    fn truncated_blob_fails_auth() {
        let key = random_key();
        assert_eq!(
            decrypt(&[0u8; NONCE_LEN + TAG_LEN - 1], &key),
            Err(CipherError::AuthenticationFailed)
        );
    }

    #[test]
    fn maps_into_seal_error() {
        assert_eq!(
            SealError::from(CipherError::InvalidKeyLength { actual: 5 }),
            SealError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: 5
            }
        );
    }
}
