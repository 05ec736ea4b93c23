//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with policy-specific eviction
//! order and lazy TTL expiration.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::policy::PolicyState;
use crate::cache::{CacheEntry, CacheStats, Clock, EvictionPolicy, StatsSnapshot, SystemClock};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// In-memory cache with one eviction policy and optional TTL.
///
/// The store has no internal locking. Wrap it in a single lock (see
/// `AppState`) since one `put` may touch the entry map, the policy order and
/// the counters together.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage, also holding the order links
    entries: HashMap<K, CacheEntry<K, V>>,
    /// Eviction bookkeeping for the configured policy
    state: PolicyState<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of live entries
    capacity: usize,
    /// Zero disables expiration
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a store reading time from the system clock.
    ///
    /// # Errors
    /// `CacheError::Configuration` when `capacity` is zero.
    pub fn new(capacity: usize, policy: EvictionPolicy, ttl: Duration) -> Result<Self> {
        Self::with_clock(capacity, policy, ttl, Arc::new(SystemClock))
    }

    /// Creates a store from a textual policy tag (`LRU`, `FIFO` or `LFU`).
    pub fn from_tag(capacity: usize, policy: &str, ttl: Duration) -> Result<Self> {
        Self::new(capacity, policy.parse()?, ttl)
    }

    /// Creates a store with an explicit time source.
    pub fn with_clock(
        capacity: usize,
        policy: EvictionPolicy,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::configuration(
                "cache capacity must be a positive integer",
            ));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity.min(4096)),
            state: PolicyState::new(policy),
            stats: CacheStats::new(),
            capacity,
            ttl,
            clock,
        })
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// An expired entry is purged and counted as both an expiration and a
    /// miss. A hit updates the policy order (LRU recency, LFU frequency).
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.ttl, now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.expire(key);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.state.on_access(&mut self.entries, key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Inserts or overwrites a value.
    ///
    /// Overwriting a live key refreshes its value and TTL window and counts
    /// as an access for LRU/LFU; it never evicts. Overwriting an expired key
    /// purges it first and then behaves as a fresh insert. A fresh insert into
    /// a full store evicts exactly one entry.
    pub fn put(&mut self, key: K, value: V) {
        let now = self.clock.now();

        if self
            .entries
            .get(&key)
            .is_some_and(|entry| entry.is_expired(self.ttl, now))
        {
            self.expire(&key);
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, now);
            self.state.on_access(&mut self.entries, &key);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_one();
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, now));
        self.state.on_insert(&mut self.entries, &key);
    }

    // == Stats ==
    /// Returns current cache statistics. Has no side effects.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            size: self.entries.len(),
            capacity: self.capacity,
            policy: self.policy(),
            ttl: self.ttl.as_secs(),
            hits: self.stats.hits,
            misses: self.stats.misses,
            evictions: self.stats.evictions,
            expirations: self.stats.expirations,
            hit_rate: self.stats.hit_rate(),
        }
    }

    /// Presence check without touching stats, order or expiry.
    ///
    /// Expired entries that have not been accessed yet still count.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the current number of entries, expired-but-untouched included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.state.policy()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Evict One ==
    fn evict_one(&mut self) {
        if let Some(victim) = self.state.select_victim(&mut self.entries) {
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(
                "{} eviction: store at capacity {}, removed one entry",
                self.policy(),
                self.capacity
            );
        }
    }

    // == Expire ==
    fn expire(&mut self, key: &K) {
        self.state.remove(&mut self.entries, key);
        if self.entries.remove(key).is_some() {
            self.stats.record_expiration();
            debug!("TTL expiration: removed one stale entry");
        }
    }

    /// Checks that the entry map and the policy lists agree.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        use std::collections::HashSet;

        assert!(self.entries.len() <= self.capacity, "capacity exceeded");

        let mut seen = HashSet::new();
        match &self.state {
            PolicyState::Recency(list) | PolicyState::Insertion(list) => {
                for key in list.iter(&self.entries) {
                    assert!(self.entries.contains_key(key), "listed key not stored");
                    assert!(seen.insert(key.clone()), "key listed twice");
                }
                assert_eq!(list.len(), seen.len());
            }
            PolicyState::Frequency {
                buckets,
                min_frequency,
            } => {
                for (&frequency, bucket) in buckets {
                    assert!(!bucket.is_empty(), "empty bucket kept");
                    let mut count = 0;
                    for key in bucket.iter(&self.entries) {
                        let entry = self.entries.get(key).expect("listed key not stored");
                        assert_eq!(entry.frequency, frequency, "key in wrong bucket");
                        assert!(seen.insert(key.clone()), "key in two buckets");
                        count += 1;
                    }
                    assert_eq!(bucket.len(), count);
                }
                let lowest = buckets.keys().min().copied().unwrap_or(0);
                assert_eq!(*min_frequency, lowest, "stale minimum frequency");
            }
        }
        assert_eq!(seen.len(), self.entries.len(), "stored key not listed");
    }
}
