//! Salted key derivation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Derive a working key from `input_key` and a context `salt`.
///
/// Computes HMAC-SHA-256 over `input_key` keyed with `salt`, renders the
/// digest as lower-case hex and truncates it to `input_key.len()` bytes. An
/// input key longer than the 64-character hex digest gets the whole digest
/// back, unpadded.
///
/// An empty salt is not special-cased here; callers decide whether to derive.
pub fn derive(input_key: &[u8], salt: &[u8]) -> Zeroizing<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts keys of any length");
    mac.update(input_key);
    let digest = mac.finalize().into_bytes();

    let mut hexed = Zeroizing::new(hex::encode(digest).into_bytes());
    hexed.truncate(input_key.len());
    hexed
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn deterministic() {
        assert_eq!(*derive(KEY, b"ctx"), *derive(KEY, b"ctx"));
    }

    #[test]
    fn different_salts_diverge() {
        assert_ne!(*derive(KEY, b"ctx-a"), *derive(KEY, b"ctx-b"));
    }

    #[test]
    fn preserves_input_length() {
        let derived = derive(KEY, b"ctx");
        assert_eq!(derived.len(), KEY.len());
        assert!(derived.iter().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn matches_hmac_hex_prefix() {
        let mut mac = HmacSha256::new_from_slice(b"ctx").unwrap();
        mac.update(KEY);
        let full = hex::encode(mac.finalize().into_bytes());
        assert_eq!(*derive(KEY, b"ctx"), full.as_bytes()[..KEY.len()]);
    }

    #[test]
    fn long_input_gets_unpadded_digest() {
        let long_key = [b'k'; 100];
        assert_eq!(derive(&long_key, b"ctx").len(), 64);
    }

    #[test]
    fn empty_salt_still_derives() {
        assert_ne!(*derive(KEY, b""), KEY);
    }
}
