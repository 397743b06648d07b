//! Software emulation of product-key sealing.

use aes_gcm_siv::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng, Payload},
    Aes256GcmSiv, Nonce,
};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::{HardwareError, HardwareSealer};
use crate::crypto::cipher::{KEY_LEN, NONCE_LEN, TAG_LEN};

/// Domain separator mixed into the identity hash.
const PRODUCT_KEY_DOMAIN: &[u8] = b"sealer/emulated-product-key/v1";

/// Seals under a key derived from a binary identity, with the salt as AAD.
///
/// Gives the hardware-rooted path something real to run against outside an
/// enclave. It offers no hardware protection: anyone who knows the identity
/// can derive the key.
pub struct EmulatedProductKey {
    cipher: Aes256GcmSiv,
}

impl EmulatedProductKey {
    /// Use `key` directly as the product key.
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        Self {
            cipher: Aes256GcmSiv::new(key.into()),
        }
    }

    /// Derive the product key from a binary identity (e.g. a signer id).
    pub fn from_identity(identity: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(PRODUCT_KEY_DOMAIN);
        hasher.update(identity);
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(&hasher.finalize());
        Self::new(&key)
    }
}

impl std::fmt::Debug for EmulatedProductKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EmulatedProductKey([REDACTED])")
    }
}

impl HardwareSealer for EmulatedProductKey {
    fn seal(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, HardwareError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        let sealed = self
            .cipher
            .encrypt(
                Nonce::from_slice(&nonce_bytes),
                Payload {
                    msg: plaintext,
                    aad: associated_data,
                },
            )
            .map_err(|_| HardwareError::Seal("aead operation failed".into()))?;

        let mut blob = Vec::with_capacity(NONCE_LEN + sealed.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&sealed);
        Ok(blob)
    }

    fn unseal(&self, blob: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, HardwareError> {
        if blob.len() < NONCE_LEN + TAG_LEN {
            return Err(HardwareError::Unseal("blob too short".into()));
        }
        let (nonce_bytes, sealed) = blob.split_at(NONCE_LEN);
        self.cipher
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                Payload {
                    msg: sealed,
                    aad: associated_data,
                },
            )
            .map_err(|_| HardwareError::Unseal("authentication failed".into()))
    }
}
