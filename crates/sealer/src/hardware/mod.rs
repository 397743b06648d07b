//! Seam for the hardware-rooted sealing primitive.
//!
//! The real primitive belongs to the host trusted-execution runtime and seals
//! under a product key bound to the signed binary. This module only defines
//! the interface the sealer calls, plus two stand-ins:
//!
//! - [`Unavailable`] for hosts with no TEE runtime; every call fails.
//! - [`EmulatedProductKey`] for development, which seals in software under a
//!   key derived from a binary identity.

pub mod emulated;

use common::SealError;
use thiserror::Error;

pub use emulated::EmulatedProductKey;

/// Errors reported by a [`HardwareSealer`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HardwareError {
    /// No hardware sealing runtime is present.
    #[error("hardware sealing runtime unavailable")]
    Unavailable,

    /// The runtime refused or failed to seal.
    #[error("seal failed: {0}")]
    Seal(String),

    /// The runtime refused or failed to unseal (wrong identity, wrong
    /// associated data, or corrupted blob).
    #[error("unseal failed: {0}")]
    Unseal(String),
}

impl From<HardwareError> for SealError {
    fn from(e: HardwareError) -> Self {
        SealError::Hardware(e.to_string())
    }
}

/// Authenticated encryption bound to the enclave identity.
///
/// `associated_data` is authenticated but not encrypted; unsealing with
/// different associated data must fail.
#[cfg_attr(test, mockall::automock)]
pub trait HardwareSealer: Send + Sync {
    /// Seal `plaintext` under the product key.
    fn seal(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, HardwareError>;

    /// Recover the plaintext from a blob produced by [`HardwareSealer::seal`].
    fn unseal(&self, blob: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, HardwareError>;
}

/// A [`HardwareSealer`] for hosts without a TEE runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl HardwareSealer for Unavailable {
    fn seal(&self, _plaintext: &[u8], _associated_data: &[u8]) -> Result<Vec<u8>, HardwareError> {
        Err(HardwareError::Unavailable)
    }

    fn unseal(&self, _blob: &[u8], _associated_data: &[u8]) -> Result<Vec<u8>, HardwareError> {
        Err(HardwareError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_always_fails() {
        assert_eq!(Unavailable.seal(b"x", b""), Err(HardwareError::Unavailable));
        assert_eq!(Unavailable.unseal(b"x", b""), Err(HardwareError::Unavailable));
    }

    #[test]
    fn error_message_is_preserved() {
        let e = SealError::from(HardwareError::Unseal("mac mismatch".into()));
        assert_eq!(e, SealError::Hardware("unseal failed: mac mismatch".into()));
    }
}
