//! Error taxonomy and sealed-envelope format shared across the sealing crates.

pub mod envelope;
pub mod error;

pub use envelope::SealedEnvelope;
pub use error::SealError;
