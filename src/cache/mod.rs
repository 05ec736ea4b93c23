//! Cache Module
//!
//! Provides the in-memory eviction cache: LRU, FIFO or LFU ordering, lazy
//! TTL expiration and running statistics.

mod clock;
mod entry;
mod list;
mod policy;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use list::KeyList;
pub use policy::EvictionPolicy;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;
