//! Sealing mode and fallback policy.

/// Which sealing path a call takes.
///
/// Resolved once per call, in priority order: simulation, then
/// hardware-rooted, then key ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealMode {
    /// Non-enclave development mode. Sealing tags the data instead of
    /// encrypting it. `standalone` records whether standalone mode was also
    /// requested, which decides where unsealing goes for untagged envelopes.
    Simulation { standalone: bool },
    /// Seal with the hardware product key.
    HardwareRooted,
    /// Seal with the most recent key ring key.
    KeyRing,
}

impl SealMode {
    /// Combine the raw flags into a mode.
    ///
    /// A test run always disables simulation, whatever the other flags say.
    pub fn resolve(standalone: bool, simulation_environment: bool, test_run: bool) -> Self {
        if (standalone || simulation_environment) && !test_run {
            SealMode::Simulation { standalone }
        } else if standalone {
            SealMode::HardwareRooted
        } else {
            SealMode::KeyRing
        }
    }

    /// `true` when standalone (hardware-rooted) mode was requested.
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            SealMode::Simulation { standalone: true } | SealMode::HardwareRooted
        )
    }
}

/// What standalone unsealing does once every ring key has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HardwareFallback {
    /// Hand the envelope to the hardware primitive.
    #[default]
    Enabled,
    /// Report the key ring failure.
    Disabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_table() {
        use SealMode::*;
        // (standalone, simulation env, test run) -> mode
        let cases = [
            ((false, false, false), KeyRing),
            ((false, true, false), Simulation { standalone: false }),
            ((true, false, false), Simulation { standalone: true }),
            ((true, true, false), Simulation { standalone: true }),
            ((false, false, true), KeyRing),
            ((false, true, true), KeyRing),
            ((true, false, true), HardwareRooted),
            ((true, true, true), HardwareRooted),
        ];
        for ((standalone, sim, test_run), expected) in cases {
            assert_eq!(
                SealMode::resolve(standalone, sim, test_run),
                expected,
                "standalone={standalone} sim={sim} test_run={test_run}"
            );
        }
    }

    #[test]
    fn standalone_detection() {
        assert!(SealMode::HardwareRooted.is_standalone());
        assert!(SealMode::Simulation { standalone: true }.is_standalone());
        assert!(!SealMode::Simulation { standalone: false }.is_standalone());
        assert!(!SealMode::KeyRing.is_standalone());
    }
}
