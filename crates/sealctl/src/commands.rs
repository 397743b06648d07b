//! `seal` and `unseal` subcommands.

use std::io::{Read, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use sealer::hardware::{EmulatedProductKey, Unavailable};
use sealer::{HardwareSealer, KeyRing, KeyRingSlot, SealedEnvelope, Sealer};
use tracing::{info, warn};

use crate::config::Config;

/// Build a [`Sealer`] from the loaded configuration.
pub fn build_sealer(cfg: &Config) -> Sealer {
    let ring = KeyRing::from_keys(cfg.keys());

    let hardware: Arc<dyn HardwareSealer> = if cfg.seal_emulated_identity.is_empty() {
        Arc::new(Unavailable)
    } else {
        warn!("hardware sealing is emulated in software");
        Arc::new(EmulatedProductKey::from_identity(
            cfg.seal_emulated_identity.as_bytes(),
        ))
    };

    let sealer = Sealer::from_config(&cfg.sealing, KeyRingSlot::with_ring(ring.clone()), hardware);
    info!(keys = ring.len(), mode = ?sealer.mode(), "sealer ready");
    sealer
}

/// Seal everything read from `input` and write the envelope text to `output`.
pub fn seal(sealer: &Sealer, salt: &str, mut input: impl Read, mut output: impl Write) -> Result<()> {
    let mut plaintext = Vec::new();
    input
        .read_to_end(&mut plaintext)
        .context("failed to read plaintext")?;

    let envelope = sealer
        .seal_with_salt(salt, &plaintext)
        .context("seal failed")?;

    writeln!(output, "{envelope}").context("failed to write envelope")?;
    Ok(())
}

/// Unseal the envelope text read from `input` and write the plaintext to `output`.
pub fn unseal(sealer: &Sealer, salt: &str, mut input: impl Read, mut output: impl Write) -> Result<()> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("failed to read envelope")?;

    let envelope = SealedEnvelope::from(text.trim());
    let plaintext = sealer
        .unseal_with_salt(salt, &envelope)
        .context("unseal failed")?;

    output
        .write_all(&plaintext)
        .context("failed to write plaintext")?;
    output.flush().context("failed to flush plaintext")?;
    Ok(())
}
