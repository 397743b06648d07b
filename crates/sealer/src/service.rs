//! [`Sealer`]: the seal/unseal entry points.

use std::sync::Arc;

use common::envelope::{parse_simulation_payload, simulation_payload};
use common::{SealError, SealedEnvelope};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::crypto::cipher;
use crate::hardware::HardwareSealer;
use crate::keyring::{trial_decrypt, working_key, KeyRingSlot};
use crate::mode::{HardwareFallback, SealMode};

/// Seals and unseals data according to a fixed [`SealMode`].
///
/// Cheap to clone: the key ring slot and hardware primitive are shared.
/// The sealer never mutates the key ring; each call reads one snapshot.
#[derive(Clone)]
pub struct Sealer {
    mode: SealMode,
    fallback: HardwareFallback,
    ring: KeyRingSlot,
    hardware: Arc<dyn HardwareSealer>,
}

impl Sealer {
    /// Create a sealer with the hardware fallback enabled.
    pub fn new(mode: SealMode, ring: KeyRingSlot, hardware: Arc<dyn HardwareSealer>) -> Self {
        if let SealMode::Simulation { .. } = mode {
            warn!("simulation mode: sealed data will NOT be encrypted");
        }
        Self {
            mode,
            fallback: HardwareFallback::default(),
            ring,
            hardware,
        }
    }

    /// Create a sealer whose mode and fallback policy come from `cfg`.
    pub fn from_config(cfg: &Config, ring: KeyRingSlot, hardware: Arc<dyn HardwareSealer>) -> Self {
        Self::new(cfg.mode(), ring, hardware).with_hardware_fallback(cfg.hardware_fallback())
    }

    /// Set the policy for standalone unsealing after every ring key fails.
    pub fn with_hardware_fallback(mut self, fallback: HardwareFallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn mode(&self) -> SealMode {
        self.mode
    }

    /// The current key ring slot this sealer reads.
    pub fn key_ring(&self) -> &KeyRingSlot {
        &self.ring
    }

    /// Seal `plaintext` with no salt.
    ///
    /// # Errors
    ///
    /// See [`Sealer::seal_with_salt`].
    pub fn seal(&self, plaintext: &[u8]) -> Result<SealedEnvelope, SealError> {
        self.seal_with_salt("", plaintext)
    }

    /// Seal `plaintext`, binding it to `salt`.
    ///
    /// In key-ring mode a non-empty salt derives the working key from the most
    /// recent ring key; in hardware-rooted mode it is passed as associated
    /// data.
    ///
    /// # Errors
    ///
    /// - [`SealError::NoKeysAvailable`] in key-ring mode with an empty ring.
    /// - [`SealError::NoEncryptionKeyAvailable`] if the most recent key is empty.
    /// - [`SealError::InvalidKeyLength`] if the working key is not 32 bytes.
    /// - [`SealError::Hardware`] if the hardware primitive fails.
    #[instrument(level = "debug", skip_all, fields(mode = ?self.mode, salted = !salt.is_empty()))]
    pub fn seal_with_salt(&self, salt: &str, plaintext: &[u8]) -> Result<SealedEnvelope, SealError> {
        let raw = match self.mode {
            SealMode::Simulation { .. } => simulation_payload(salt, plaintext),
            SealMode::HardwareRooted => self.hardware.seal(plaintext, salt.as_bytes())?,
            SealMode::KeyRing => self.seal_with_ring(salt, plaintext)?,
        };
        debug!(len = raw.len(), "sealed");
        Ok(SealedEnvelope::encode(&raw))
    }

    /// Unseal `envelope` with no salt.
    ///
    /// # Errors
    ///
    /// See [`Sealer::unseal_with_salt`].
    pub fn unseal(&self, envelope: &SealedEnvelope) -> Result<Vec<u8>, SealError> {
        self.unseal_with_salt("", envelope)
    }

    /// Unseal `envelope`, which must have been sealed with the same `salt`.
    ///
    /// The envelope does not say how it was sealed, so paths are tried in
    /// order: the simulation format (simulation mode only), then the key ring,
    /// then, in standalone mode with the fallback enabled, the hardware
    /// primitive.
    ///
    /// # Errors
    ///
    /// - [`SealError::Encoding`] if the envelope is not valid base64.
    /// - [`SealError::NoKeysAvailable`] outside standalone mode with an empty ring.
    /// - [`SealError::DecryptionFailed`] if no ring key recovers the plaintext.
    /// - [`SealError::Hardware`] if the hardware fallback fails.
    #[instrument(level = "debug", skip_all, fields(mode = ?self.mode, salted = !salt.is_empty()))]
    pub fn unseal_with_salt(&self, salt: &str, envelope: &SealedEnvelope) -> Result<Vec<u8>, SealError> {
        let standalone = match self.mode {
            SealMode::Simulation { standalone } => {
                let raw = envelope.decode()?;
                if let Some(plaintext) = parse_simulation_payload(&raw) {
                    debug!("unsealed simulation payload");
                    return Ok(plaintext);
                }
                standalone
            }
            SealMode::HardwareRooted => true,
            SealMode::KeyRing => false,
        };

        if standalone {
            self.unseal_standalone(salt, envelope)
        } else {
            self.unseal_with_ring(salt, envelope)
        }
    }

    fn seal_with_ring(&self, salt: &str, plaintext: &[u8]) -> Result<Vec<u8>, SealError> {
        let keys = self.ring.snapshot();
        let key = keys.last().ok_or(SealError::NoKeysAvailable)?;
        if key.is_empty() {
            return Err(SealError::NoEncryptionKeyAvailable);
        }
        let key = working_key(key, salt);
        Ok(cipher::encrypt(plaintext, &key)?)
    }

    fn unseal_with_ring(&self, salt: &str, envelope: &SealedEnvelope) -> Result<Vec<u8>, SealError> {
        let keys = self.ring.snapshot();
        if keys.is_empty() {
            return Err(SealError::NoKeysAvailable);
        }
        let raw = envelope.decode()?;
        trial_decrypt(&keys, salt, &raw)
    }

    fn unseal_standalone(&self, salt: &str, envelope: &SealedEnvelope) -> Result<Vec<u8>, SealError> {
        let raw = envelope.decode()?;
        let keys = self.ring.snapshot();

        let ring_err = match trial_decrypt(&keys, salt, &raw) {
            Ok(plaintext) => return Ok(plaintext),
            Err(e) => e,
        };

        match self.fallback {
            HardwareFallback::Disabled => Err(ring_err),
            HardwareFallback::Enabled => {
                debug!(ring_error = %ring_err, "falling back to hardware unseal");
                Ok(self.hardware.unseal(&raw, salt.as_bytes())?)
            }
        }
    }
}

impl std::fmt::Debug for Sealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sealer")
            .field("mode", &self.mode)
            .field("fallback", &self.fallback)
            .field("ring", &self.ring)
            .finish_non_exhaustive()
    }
}
