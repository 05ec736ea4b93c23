//! Eviction Policy Module
//!
//! The three supported eviction orderings and the bookkeeping each one keeps
//! alongside the entry map.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheEntry, KeyList};
use crate::error::CacheError;

// == Eviction Policy ==
/// Eviction ordering, fixed when the store is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionPolicy {
    /// Least recently used
    #[default]
    Lru,
    /// First in, first out
    Fifo,
    /// Least frequently used
    Lfu,
}

impl EvictionPolicy {
    /// Returns the configuration tag for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "LRU",
            EvictionPolicy::Fifo => "FIFO",
            EvictionPolicy::Lfu => "LFU",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "LRU" => Ok(EvictionPolicy::Lru),
            "FIFO" => Ok(EvictionPolicy::Fifo),
            "LFU" => Ok(EvictionPolicy::Lfu),
            _ => Err(CacheError::configuration(format!(
                "unknown eviction policy '{}', expected one of LRU, FIFO, LFU",
                tag
            ))),
        }
    }
}

// == Policy State ==
/// Policy-private ordering structures.
///
/// Every live key sits in exactly one list: the recency order (LRU), the
/// insertion queue (FIFO) or the bucket matching its frequency (LFU).
#[derive(Debug)]
pub(crate) enum PolicyState<K> {
    Recency(KeyList<K>),
    Insertion(KeyList<K>),
    Frequency {
        buckets: HashMap<u64, KeyList<K>>,
        min_frequency: u64,
    },
}

impl<K: Eq + Hash + Clone> PolicyState<K> {
    pub fn new(policy: EvictionPolicy) -> Self {
        match policy {
            EvictionPolicy::Lru => PolicyState::Recency(KeyList::new()),
            EvictionPolicy::Fifo => PolicyState::Insertion(KeyList::new()),
            EvictionPolicy::Lfu => PolicyState::Frequency {
                buckets: HashMap::new(),
                min_frequency: 0,
            },
        }
    }

    pub fn policy(&self) -> EvictionPolicy {
        match self {
            PolicyState::Recency(_) => EvictionPolicy::Lru,
            PolicyState::Insertion(_) => EvictionPolicy::Fifo,
            PolicyState::Frequency { .. } => EvictionPolicy::Lfu,
        }
    }

    // == On Insert ==
    /// Links a freshly inserted key (frequency 1) into the policy order.
    pub fn on_insert<V>(&mut self, entries: &mut HashMap<K, CacheEntry<K, V>>, key: &K) {
        match self {
            PolicyState::Recency(list) | PolicyState::Insertion(list) => {
                list.push_back(entries, key);
            }
            PolicyState::Frequency {
                buckets,
                min_frequency,
            } => {
                buckets.entry(1).or_default().push_back(entries, key);
                *min_frequency = 1;
            }
        }
    }

    // == On Access ==
    /// Applies hit-time bookkeeping. FIFO ignores accesses.
    pub fn on_access<V>(&mut self, entries: &mut HashMap<K, CacheEntry<K, V>>, key: &K) {
        match self {
            PolicyState::Recency(list) => list.move_to_back(entries, key),
            PolicyState::Insertion(_) => {}
            PolicyState::Frequency {
                buckets,
                min_frequency,
            } => {
                let Some(old) = entries.get(key).map(|entry| entry.frequency) else {
                    return;
                };

                if let Some(bucket) = buckets.get_mut(&old) {
                    bucket.unlink(entries, key);
                    if bucket.is_empty() {
                        buckets.remove(&old);
                        // The key lands in old + 1 below, so that bucket is
                        // the next non-empty one.
                        if *min_frequency == old {
                            *min_frequency = old + 1;
                        }
                    }
                }

                let new = old + 1;
                if let Some(entry) = entries.get_mut(key) {
                    entry.frequency = new;
                }
                buckets.entry(new).or_default().push_back(entries, key);
            }
        }
    }

    // == Remove ==
    /// Unlinks `key` ahead of its removal from the entry map.
    pub fn remove<V>(&mut self, entries: &mut HashMap<K, CacheEntry<K, V>>, key: &K) {
        match self {
            PolicyState::Recency(list) | PolicyState::Insertion(list) => {
                list.unlink(entries, key);
            }
            PolicyState::Frequency {
                buckets,
                min_frequency,
            } => {
                let Some(frequency) = entries.get(key).map(|entry| entry.frequency) else {
                    return;
                };
                if let Some(bucket) = buckets.get_mut(&frequency) {
                    bucket.unlink(entries, key);
                    if bucket.is_empty() {
                        buckets.remove(&frequency);
                        if *min_frequency == frequency {
                            *min_frequency = lowest_bucket(buckets);
                        }
                    }
                }
            }
        }
    }

    // == Select Victim ==
    /// Unlinks and returns the key to evict next.
    ///
    /// LFU ties inside the minimum bucket go to the key that entered the
    /// bucket first.
    pub fn select_victim<V>(&mut self, entries: &mut HashMap<K, CacheEntry<K, V>>) -> Option<K> {
        match self {
            PolicyState::Recency(list) | PolicyState::Insertion(list) => list.pop_front(entries),
            PolicyState::Frequency {
                buckets,
                min_frequency,
            } => {
                if !buckets.contains_key(&*min_frequency) {
                    *min_frequency = lowest_bucket(buckets);
                }
                let frequency = *min_frequency;
                let bucket = buckets.get_mut(&frequency)?;
                let victim = bucket.pop_front(entries);
                if bucket.is_empty() {
                    buckets.remove(&frequency);
                    *min_frequency = lowest_bucket(buckets);
                }
                victim
            }
        }
    }
}

/// Lowest populated frequency, or 0 when there are no buckets.
fn lowest_bucket<K>(buckets: &HashMap<u64, KeyList<K>>) -> u64 {
    buckets.keys().min().copied().unwrap_or(0)
}
