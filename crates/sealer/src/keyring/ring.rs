//! [`KeyRing`] and [`KeyRingSlot`]: shared, append-only key storage.

use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single key held by the ring.
///
/// Any length is accepted; the cipher rejects keys that are not
/// [`KEY_LEN`](crate::crypto::KEY_LEN) bytes when the key is used.
/// The memory is zeroed when the last copy is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RingKey(Vec<u8>);

impl RingKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for RingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("RingKey([REDACTED])")
    }
}

/// Ordered, append-only collection of keys.
///
/// Cloning a [`KeyRing`] yields another handle to the same keys. Internally
/// backed by [`ArcSwap`]: [`KeyRing::add`] publishes a new immutable snapshot
/// with read-copy-update, so a reader sees the ring either before or after an
/// `add` and never a partially written key.
#[derive(Clone, Debug)]
pub struct KeyRing {
    inner: Arc<ArcSwap<Vec<RingKey>>>,
}

impl KeyRing {
    /// Create a new, empty [`KeyRing`].
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ArcSwap::new(Arc::new(Vec::new()))),
        }
    }

    /// Build a ring from `keys`, oldest first. The last key is the most recent.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Vec<u8>>,
    {
        let keys: Vec<RingKey> = keys.into_iter().map(RingKey::new).collect();
        Self {
            inner: Arc::new(ArcSwap::new(Arc::new(keys))),
        }
    }

    /// Append a key, making it the most recent one.
    ///
    /// Length is not checked here; see [`RingKey`].
    pub fn add(&self, key: impl Into<Vec<u8>>) {
        let key = RingKey::new(key);
        self.inner.rcu(|keys| {
            let mut next = Vec::with_capacity(keys.len() + 1);
            next.extend(keys.iter().cloned());
            next.push(key.clone());
            next
        });
    }

    /// Return the number of keys in the ring.
    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    /// Return `true` if no keys have been added.
    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }

    /// The most recently added key, or `None` if the ring is empty.
    pub fn most_recent_key(&self) -> Option<RingKey> {
        self.inner.load().last().cloned()
    }

    /// All keys, most recently added first.
    pub fn keys_newest_first(&self) -> Vec<RingKey> {
        self.inner.load().iter().rev().cloned().collect()
    }

    /// Take a consistent view of the ring, oldest key first.
    ///
    /// Later `add` calls do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<Vec<RingKey>> {
        self.inner.load_full()
    }
}

impl Default for KeyRing {
    fn default() -> Self {
        Self::new()
    }
}

/// The "current key ring" consulted by the sealer.
///
/// Shared by cloning; installing a ring through one handle is visible through
/// all of them. An empty slot behaves exactly like an empty ring.
#[derive(Clone, Debug, Default)]
pub struct KeyRingSlot {
    inner: Arc<ArcSwapOption<KeyRing>>,
}

impl KeyRingSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot with `ring` already installed.
    pub fn with_ring(ring: KeyRing) -> Self {
        let slot = Self::new();
        slot.install(ring);
        slot
    }

    /// Atomically make `ring` the current key ring.
    pub fn install(&self, ring: KeyRing) {
        self.inner.store(Some(Arc::new(ring)));
    }

    /// Remove the current key ring.
    pub fn clear(&self) {
        self.inner.store(None);
    }

    /// A handle to the current key ring, if one is installed.
    pub fn current(&self) -> Option<KeyRing> {
        self.inner.load_full().map(|ring| KeyRing::clone(&ring))
    }

    /// Snapshot of the current ring's keys; empty when no ring is installed.
    pub fn snapshot(&self) -> Arc<Vec<RingKey>> {
        self.current()
            .map(|ring| ring.snapshot())
            .unwrap_or_default()
    }
}
