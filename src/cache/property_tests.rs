//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's capacity, ordering and accounting
//! properties under arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, EvictionPolicy, ManualClock};

// == Test Configuration ==
const TEST_CAPACITY: usize = 8;

// == Strategies ==
/// Small key space so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-l]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = u32> {
    any::<u32>()
}

fn policy_strategy() -> impl Strategy<Value = EvictionPolicy> {
    prop_oneof![
        Just(EvictionPolicy::Lru),
        Just(EvictionPolicy::Fifo),
        Just(EvictionPolicy::Lfu),
    ]
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: u32 },
    Get { key: String },
    Advance { secs: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Put { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => (0u64..4).prop_map(|secs| CacheOp::Advance { secs }),
    ]
}

/// Distinct keys in generation order
fn unique(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

fn fill(store: &mut CacheStore<String, u32>, keys: &[String]) {
    for (i, key) in keys.iter().enumerate() {
        store.put(key.clone(), i as u32);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every get is either a hit or a miss, and hit_rate follows from them.
    #[test]
    fn prop_statistics_accuracy(
        policy in policy_strategy(),
        ttl in 0u64..3,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let clock = Arc::new(ManualClock::new());
        let mut store = CacheStore::with_clock(
            TEST_CAPACITY, policy, Duration::from_secs(ttl), clock.clone()
        ).unwrap();
        let mut gets: u64 = 0;
        let mut expected_hits: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => store.put(key, value),
                CacheOp::Get { key } => {
                    gets += 1;
                    if store.get(&key).is_some() {
                        expected_hits += 1;
                    }
                }
                CacheOp::Advance { secs } => clock.advance(Duration::from_secs(secs)),
            }
            store.debug_validate_invariants();
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits + stats.misses, gets);
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.size, store.len());
        if gets == 0 {
            prop_assert_eq!(stats.hit_rate, 0.0);
        } else {
            prop_assert_eq!(stats.hit_rate, stats.hits as f64 / gets as f64);
        }
        if ttl == 0 {
            prop_assert_eq!(stats.expirations, 0);
        }
    }

    // The entry count never exceeds capacity after any put.
    #[test]
    fn prop_capacity_enforcement(
        policy in policy_strategy(),
        capacity in 1usize..6,
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..120)
    ) {
        let mut store = CacheStore::new(capacity, policy, Duration::ZERO).unwrap();

        for (key, value) in entries {
            store.put(key, value);
            prop_assert!(
                store.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                store.len(),
                capacity
            );
        }
        store.debug_validate_invariants();
    }

    // Re-putting an existing key keeps the size and never evicts.
    #[test]
    fn prop_update_does_not_evict(
        policy in policy_strategy(),
        keys in prop::collection::vec(key_strategy(), 1..TEST_CAPACITY),
        pick in any::<prop::sample::Index>(),
        value in value_strategy()
    ) {
        let keys = unique(keys);
        let mut store = CacheStore::new(keys.len(), policy, Duration::ZERO).unwrap();
        fill(&mut store, &keys);

        let before = store.stats();
        let key = pick.get(&keys).clone();
        store.put(key.clone(), value);
        let after = store.stats();

        prop_assert_eq!(after.size, before.size);
        prop_assert_eq!(after.evictions, before.evictions);
        prop_assert_eq!(store.get(&key), Some(value));
    }

    // Each new key inserted into a full store removes exactly one entry.
    #[test]
    fn prop_one_eviction_per_insert(
        policy in policy_strategy(),
        capacity in 1usize..6,
        rounds in 1usize..30
    ) {
        let mut store = CacheStore::new(capacity, policy, Duration::ZERO).unwrap();
        for i in 0..capacity {
            store.put(format!("seed{}", i), 0u32);
        }

        for round in 0..rounds {
            let before = store.stats();
            store.put(format!("new{}", round), round as u32);
            let after = store.stats();

            prop_assert_eq!(after.evictions, before.evictions + 1);
            prop_assert_eq!(after.size, capacity);
            store.debug_validate_invariants();
        }
    }

    // LRU: after a get, the accessed key is not the next victim.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::vec(key_strategy(), 3..TEST_CAPACITY),
        new_key in key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(keys.len() >= 2);
        prop_assume!(!keys.contains(&new_key));

        let mut store = CacheStore::new(keys.len(), EvictionPolicy::Lru, Duration::ZERO).unwrap();
        fill(&mut store, &keys);

        store.get(&keys[0]);
        store.put(new_key.clone(), 0);

        prop_assert!(store.contains(&keys[0]), "Accessed key was evicted");
        prop_assert!(!store.contains(&keys[1]), "Least recently used key survived");
        prop_assert!(store.contains(&new_key));
    }

    // FIFO: repeated gets never rescue the oldest insert.
    #[test]
    fn prop_fifo_insertion_order(
        keys in prop::collection::vec(key_strategy(), 2..TEST_CAPACITY),
        touches in 1usize..10,
        new_key in key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(!keys.contains(&new_key));

        let mut store = CacheStore::new(keys.len(), EvictionPolicy::Fifo, Duration::ZERO).unwrap();
        fill(&mut store, &keys);

        for _ in 0..touches {
            store.get(&keys[0]);
        }
        store.put(new_key.clone(), 0);

        prop_assert!(!store.contains(&keys[0]), "Oldest insert survived");
        for key in keys.iter().skip(1) {
            prop_assert!(store.contains(key));
        }
    }

    // LFU: the victim always comes from the lowest frequency present.
    #[test]
    fn prop_lfu_evicts_from_minimum_bucket(
        keys in prop::collection::vec(key_strategy(), 2..TEST_CAPACITY),
        hits in prop::collection::vec(0usize..5, TEST_CAPACITY),
        new_key in key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(!keys.contains(&new_key));

        let mut store = CacheStore::new(keys.len(), EvictionPolicy::Lfu, Duration::ZERO).unwrap();
        fill(&mut store, &keys);

        for (key, &count) in keys.iter().zip(hits.iter()) {
            for _ in 0..count {
                store.get(key);
            }
        }
        let lowest = keys.iter().zip(hits.iter()).map(|(_, &c)| c).min().unwrap_or(0);

        store.put(new_key, 0);

        let evicted: Vec<usize> = keys
            .iter()
            .zip(hits.iter())
            .filter(|(key, _)| !store.contains(key))
            .map(|(_, &count)| count)
            .collect();
        prop_assert_eq!(evicted.len(), 1);
        prop_assert_eq!(evicted[0], lowest);
        store.debug_validate_invariants();
    }
}

// Concurrent access through the single lock used by the service
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn prop_concurrent_operation_correctness(
        policy in policy_strategy(),
        operations in prop::collection::vec(cache_op_strategy(), 10..60)
    ) {
        use tokio::sync::RwLock;

        let total_gets = operations
            .iter()
            .filter(|op| matches!(op, CacheOp::Get { .. }))
            .count() as u64;

        let store = Arc::new(RwLock::new(
            CacheStore::<String, u32>::new(TEST_CAPACITY, policy, Duration::ZERO).unwrap(),
        ));

        tokio_test::block_on(async {
            let mut handles = vec![];
            for op in operations {
                let store = Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    let mut cache = store.write().await;
                    match op {
                        CacheOp::Put { key, value } => cache.put(key, value),
                        CacheOp::Get { key } => {
                            cache.get(&key);
                        }
                        CacheOp::Advance { .. } => {}
                    }
                }));
            }
            for handle in handles {
                handle.await.expect("Task should not panic");
            }
        });

        let cache = tokio_test::block_on(store.read());
        let stats = cache.stats();
        prop_assert!(stats.size <= TEST_CAPACITY);
        prop_assert_eq!(stats.hits + stats.misses, total_gets);
        cache.debug_validate_invariants();
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_minimum_bucket_scenario() {
        let mut store = CacheStore::new(3, EvictionPolicy::Lfu, Duration::ZERO).unwrap();
        store.put("k1".to_string(), 1u32);
        store.put("k2".to_string(), 2);
        store.put("k3".to_string(), 3);

        store.get(&"k1".to_string());
        store.get(&"k1".to_string());
        store.get(&"k2".to_string());
        store.put("k4".to_string(), 4);

        assert!(!store.contains(&"k3".to_string()));
        assert_eq!(store.len(), 3);
    }
}
