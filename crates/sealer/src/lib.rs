//! Sealing of data at rest for code running in a trusted execution environment.
//!
//! Two real sealing paths are supported:
//! 1. **Key ring** (default): AES-256-GCM-SIV under the most recent key of an
//!    operator-managed [`KeyRing`], optionally salted per context. Unsealing
//!    tries every key, newest first.
//! 2. **Hardware-rooted**: the TEE product key via a [`HardwareSealer`],
//!    with the salt as associated data.
//!
//! A third, simulation mode tags data instead of encrypting it so that code
//! can run outside an enclave during development.
//!
//! ```no_run
//! use std::sync::Arc;
//! use sealer::{hardware::Unavailable, KeyRing, KeyRingSlot, SealMode, Sealer};
//!
//! let ring = KeyRing::new();
//! ring.add("0123456789abcdef0123456789abcdef");
//!
//! let sealer = Sealer::new(SealMode::KeyRing, KeyRingSlot::with_ring(ring), Arc::new(Unavailable));
//! let sealed = sealer.seal_with_salt("my-salt", b"sensitive data")?;
//! assert_eq!(sealer.unseal_with_salt("my-salt", &sealed)?, b"sensitive data");
//! # Ok::<(), sealer::SealError>(())
//! ```

pub mod config;
pub mod crypto;
pub mod hardware;
pub mod keyring;
pub mod mode;
pub mod service;

pub use common::{SealError, SealedEnvelope};
pub use config::Config;
pub use hardware::HardwareSealer;
pub use keyring::{KeyRing, KeyRingSlot, RingKey};
pub use mode::{HardwareFallback, SealMode};
pub use service::Sealer;
