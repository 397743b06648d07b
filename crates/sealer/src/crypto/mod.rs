//! Symmetric sealing primitives: AES-256-GCM-SIV and salted key derivation.
//!
//! This module is free of mode and key-ring logic. It provides the low-level
//! operations used by the key ring and the sealer.
//!
//! # Blob format
//!
//! ```text
//! <nonce: 12 bytes><ciphertext><tag: 16 bytes>
//! ```
//!
//! No key identifier is embedded; the key ring finds the right key by trial.

pub mod cipher;
pub mod kdf;

pub use cipher::{CipherError, KEY_LEN};
