//! Mode flags read from the process environment.
//!
//! Every field has a default, so an empty environment yields plain key-ring
//! sealing with the hardware fallback enabled.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::mode::{HardwareFallback, SealMode};

/// Sealing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Forces the hardware-rooted sealing path (`SEAL_STANDALONE_MODE`).
    #[serde(default)]
    pub seal_standalone_mode: bool,

    /// Simulation signal from the TEE SDK; `"1"` means non-enclave (`OE_SIMULATION`).
    #[serde(default)]
    pub oe_simulation: String,

    /// `"true"` means enclave validation is skipped, i.e. simulation (`SKIP_VALIDATION`).
    #[serde(default)]
    pub skip_validation: String,

    /// Any non-empty value marks an internal test run, which disables the
    /// simulation shortcut so real cryptography is exercised (`SEAL_TEST_RUN`).
    #[serde(default)]
    pub seal_test_run: String,

    /// Whether standalone unsealing may fall back to the hardware primitive
    /// after every ring key fails (`SEAL_HARDWARE_FALLBACK`).
    #[serde(default = "default_hardware_fallback")]
    pub seal_hardware_fallback: bool,
}

fn default_hardware_fallback() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seal_standalone_mode: false,
            oe_simulation: String::new(),
            skip_validation: String::new(),
            seal_test_run: String::new(),
            seal_hardware_fallback: default_hardware_fallback(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed
    /// (e.g. `SEAL_STANDALONE_MODE=maybe`).
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build sealing configuration from environment")?;

        cfg.try_deserialize()
            .context("failed to deserialise sealing configuration")
    }

    /// `true` when the environment signals a non-enclave context.
    pub fn is_simulation_environment(&self) -> bool {
        self.oe_simulation == "1" || self.skip_validation == "true"
    }

    /// `true` when an internal test run forces real cryptography.
    pub fn is_test_run(&self) -> bool {
        !self.seal_test_run.is_empty()
    }

    /// Resolve the flags into a single [`SealMode`].
    pub fn mode(&self) -> SealMode {
        SealMode::resolve(
            self.seal_standalone_mode,
            self.is_simulation_environment(),
            self.is_test_run(),
        )
    }

    /// The configured [`HardwareFallback`] policy.
    pub fn hardware_fallback(&self) -> HardwareFallback {
        if self.seal_hardware_fallback {
            HardwareFallback::Enabled
        } else {
            HardwareFallback::Disabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config::default()
    }

    #[test]
    fn defaults_are_correct() {
        assert!(default_hardware_fallback());
        let cfg = base();
        assert_eq!(cfg.mode(), SealMode::KeyRing);
        assert_eq!(cfg.hardware_fallback(), HardwareFallback::Enabled);
    }

    #[test]
    fn oe_simulation_requires_exact_value() {
        let mut cfg = base();
        cfg.oe_simulation = "1".into();
        assert!(cfg.is_simulation_environment());
        cfg.oe_simulation = "true".into();
        assert!(!cfg.is_simulation_environment());
    }

    #[test]
    fn skip_validation_requires_exact_value() {
        let mut cfg = base();
        cfg.skip_validation = "true".into();
        assert_eq!(cfg.mode(), SealMode::Simulation { standalone: false });
        cfg.skip_validation = "1".into();
        assert_eq!(cfg.mode(), SealMode::KeyRing);
    }

    #[test]
    fn standalone_without_test_run_is_simulation() {
        let cfg = Config {
            seal_standalone_mode: true,
            ..base()
        };
        assert_eq!(cfg.mode(), SealMode::Simulation { standalone: true });
    }

    #[test]
    fn test_run_forces_real_paths() {
        let cfg = Config {
            seal_standalone_mode: true,
            oe_simulation: "1".into(),
            seal_test_run: "1".into(),
            ..base()
        };
        assert_eq!(cfg.mode(), SealMode::HardwareRooted);

        let cfg = Config {
            oe_simulation: "1".into(),
            seal_test_run: "yes".into(),
            ..base()
        };
        assert_eq!(cfg.mode(), SealMode::KeyRing);
    }

    #[test]
    fn fallback_can_be_disabled() {
        let cfg = Config {
            seal_hardware_fallback: false,
            ..base()
        };
        assert_eq!(cfg.hardware_fallback(), HardwareFallback::Disabled);
    }
}
