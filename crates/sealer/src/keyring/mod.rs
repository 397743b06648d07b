//! Key ring storage and trial decryption.
//!
//! # Lifecycle
//!
//! 1. An operator builds a [`KeyRing`] and appends keys with [`KeyRing::add`].
//!    The most recently added key seals new data.
//! 2. The ring is installed into a [`KeyRingSlot`], the "current key ring"
//!    handle injected into the [`Sealer`](crate::Sealer).
//! 3. Each seal or unseal call takes one snapshot of the current ring and
//!    uses it for the whole call.
//!
//! # Security invariants
//!
//! - Key material is never logged or printed; [`RingKey`] redacts its `Debug`
//!   output and zeroes its memory on drop.
//! - Ciphertexts carry no key identifier. Unsealing tries every key,
//!   newest first, and relies on authenticated encryption to reject the
//!   wrong ones.

pub mod ring;
pub mod trial;

pub use ring::{KeyRing, KeyRingSlot, RingKey};
pub use trial::{trial_decrypt, working_key};
