//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single mapping slot.
///
/// `prev` and `next` are the entry's links inside whichever [`KeyList`]
/// currently holds its key (recency order, insertion queue or one frequency
/// bucket). An entry belongs to exactly one list at a time.
///
/// [`KeyList`]: super::KeyList
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The stored value
    pub value: V,
    /// Time of the most recent insert or overwrite
    pub inserted_at: Instant,
    /// Access count, only meaningful under LFU
    pub frequency: u64,
    pub(crate) prev: Option<K>,
    pub(crate) next: Option<K>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a fresh, unlinked entry with frequency 1.
    pub fn new(value: V, inserted_at: Instant) -> Self {
        Self {
            value,
            inserted_at,
            frequency: 1,
            prev: None,
            next: None,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `ttl` at `now`.
    ///
    /// A zero TTL disables expiration entirely. Otherwise the entry is
    /// expired only once its age strictly exceeds the TTL.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        if ttl.is_zero() {
            return false;
        }
        now.saturating_duration_since(self.inserted_at) > ttl
    }

    // == Refresh ==
    /// Replaces the value and restarts the TTL window.
    pub fn refresh(&mut self, value: V, now: Instant) {
        self.value = value;
        self.inserted_at = now;
    }
}
