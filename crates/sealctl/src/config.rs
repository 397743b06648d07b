//! Configuration loading and validation for `sealctl`.

use anyhow::{Context, Result};
use serde::Deserialize;

use sealer::crypto::KEY_LEN;

/// Validated `sealctl` configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Comma-separated ring keys, oldest first (`SEAL_KEYS`). The last entry
    /// seals new data.
    #[serde(default)]
    pub seal_keys: String,

    /// When set, hardware-rooted sealing is emulated in software under a
    /// product key derived from this identity (`SEAL_EMULATED_IDENTITY`).
    /// When empty, the hardware path is unavailable.
    #[serde(default)]
    pub seal_emulated_identity: String,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Mode flags shared with the library, loaded from the same environment.
    #[serde(skip)]
    pub sealing: sealer::Config,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build sealctl configuration")?;

        let mut c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise sealctl configuration")?;
        c.sealing = sealer::Config::from_env()?;

        c.validate()?;
        Ok(c)
    }

    /// The configured ring keys, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.seal_keys
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    fn validate(&self) -> Result<()> {
        for (i, key) in self.keys().enumerate() {
            if key.len() != KEY_LEN {
                anyhow::bail!(
                    "SEAL_KEYS entry {i} must be exactly {KEY_LEN} bytes, got {}",
                    key.len()
                );
            }
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}
