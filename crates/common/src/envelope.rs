//! The sealed-envelope text format.
//!
//! Every sealed value leaves the library as standard base64 text. Inside the
//! encoding is one of:
//!
//! ```text
//! SIM_ENCRYPTED:<salt>:<plaintext>      simulation payload (no cryptography)
//! <nonce><ciphertext+tag>               key-ring blob
//! <opaque>                              hardware-sealed blob
//! ```
//!
//! The last two carry no key identifier or mode tag; they are told apart only
//! by which unseal path succeeds.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::SealError;

/// Tag that opens every simulation payload.
pub const SIMULATION_TAG: &[u8] = b"SIM_ENCRYPTED:";

/// Separator between the salt field and the plaintext in a simulation payload.
pub const SIMULATION_SEPARATOR: u8 = b':';

/// Text-safe sealed value, as returned by seal and accepted by unseal.
///
/// Serialises as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SealedEnvelope(String);

impl SealedEnvelope {
    /// Wrap raw sealed bytes in the text encoding.
    pub fn encode(raw: &[u8]) -> Self {
        Self(STANDARD.encode(raw))
    }

    /// Recover the raw sealed bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Encoding`] if the text is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, SealError> {
        STANDARD
            .decode(self.0.trim())
            .map_err(|e| SealError::Encoding(e.to_string()))
    }

    /// Borrow the encoded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the envelope, returning the encoded text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SealedEnvelope {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for SealedEnvelope {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl fmt::Display for SealedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the raw simulation payload `SIM_ENCRYPTED:<salt>:<plaintext>`.
pub fn simulation_payload(salt: &str, plaintext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(SIMULATION_TAG.len() + salt.len() + 1 + plaintext.len());
    out.extend_from_slice(SIMULATION_TAG);
    out.extend_from_slice(salt.as_bytes());
    out.push(SIMULATION_SEPARATOR);
    out.extend_from_slice(plaintext);
    out
}

/// Extract the plaintext from a raw simulation payload.
///
/// Returns `None` when `raw` does not start with [`SIMULATION_TAG`]. The salt
/// field ends at the first separator after the tag, so a salt containing `:`
/// cuts the field early. When no separator follows the tag, the remainder is
/// returned verbatim.
pub fn parse_simulation_payload(raw: &[u8]) -> Option<Vec<u8>> {
    let rest = raw.strip_prefix(SIMULATION_TAG)?;
    match rest.iter().position(|&b| b == SIMULATION_SEPARATOR) {
        Some(salt_end) => Some(rest[salt_end + 1..].to_vec()),
        None => Some(rest.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulation_payload_is_self_describing() {
        let env = SealedEnvelope::encode(&simulation_payload("ctx", b"hello"));
        let raw = env.decode().unwrap();
        assert!(raw.starts_with(b"SIM_ENCRYPTED:ctx:hello"));
    }

    #[test]
    fn parse_returns_plaintext() {
        let raw = simulation_payload("ctx", b"hello");
        assert_eq!(parse_simulation_payload(&raw).unwrap(), b"hello");
    }

    #[test]
    fn parse_handles_empty_salt() {
        let raw = simulation_payload("", b"hello");
        assert_eq!(raw, b"SIM_ENCRYPTED::hello");
        assert_eq!(parse_simulation_payload(&raw).unwrap(), b"hello");
    }

    #[test]
    fn parse_keeps_separators_inside_plaintext() {
        let raw = simulation_payload("ctx", b"a:b:c");
        assert_eq!(parse_simulation_payload(&raw).unwrap(), b"a:b:c");
    }

    #[test]
    fn parse_without_separator_returns_remainder() {
        assert_eq!(
            parse_simulation_payload(b"SIM_ENCRYPTED:no-separator").unwrap(),
            b"no-separator"
        );
    }

    #[test]
    fn parse_rejects_untagged_payload() {
        assert!(parse_simulation_payload(b"SIM_ENCRYPTE").is_none());
        assert!(parse_simulation_payload(&[0x01, 0x02, 0x03]).is_none());
    }

    #[test]
    fn decode_rejects_bad_base64() {
        let env = SealedEnvelope::from("!!not base64!!");
        assert!(matches!(env.decode(), Err(SealError::Encoding(_))));
    }

    #[test]
    fn envelope_serialises_as_bare_string() {
        let env = SealedEnvelope::encode(b"\x00\x01binary");
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, format!("\"{}\"", env.as_str()));
        let back: SealedEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }
}
