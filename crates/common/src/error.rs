//! Common error types shared across crates.

use thiserror::Error;

/// Top-level sealing error type.
///
/// Every failure of a seal or unseal call is reported to the immediate caller
/// as one of these variants. Variants map to process exit codes used by
/// `sealctl`:
/// - key resolution failures ([`SealError::NoKeysAvailable`],
///   [`SealError::NoEncryptionKeyAvailable`], [`SealError::InvalidKeyLength`]) → 3
/// - integrity failures ([`SealError::AuthenticationFailed`],
///   [`SealError::DecryptionFailed`]) → 4
/// - [`SealError::Encoding`] → 65
/// - [`SealError::Hardware`] → 70
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SealError {
    /// The key ring is empty (or not installed) and key-ring mode needs a key.
    #[error("no keys available in key ring")]
    NoKeysAvailable,

    /// The key ring is populated but the resolved key is unusable (empty).
    #[error("no encryption key available")]
    NoEncryptionKeyAvailable,

    /// The key is not the length the cipher requires.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// A single decryption attempt failed its integrity check.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// No key in the ring could recover the plaintext.
    #[error("failed to decrypt with any key in the ring ({attempted} tried)")]
    DecryptionFailed { attempted: usize },

    /// The sealed envelope is not valid text encoding.
    #[error("malformed sealed envelope: {0}")]
    Encoding(String),

    /// The hardware-rooted sealing primitive reported an error.
    #[error("hardware sealing failed: {0}")]
    Hardware(String),
}

impl SealError {
    /// Returns the process exit code `sealctl` uses for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SealError::NoKeysAvailable
            | SealError::NoEncryptionKeyAvailable
            | SealError::InvalidKeyLength { .. } => 3,
            SealError::AuthenticationFailed | SealError::DecryptionFailed { .. } => 4,
            SealError::Encoding(_) => 65,
            SealError::Hardware(_) => 70,
        }
    }
}
