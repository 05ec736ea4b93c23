//! Query Cache - question cache in front of a scoring service
//!
//! Answers questions from an in-memory cache with LRU, FIFO or LFU eviction
//! and optional TTL, falling back to the scoring service on a miss.

pub mod api;
pub mod cache;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheStore, EvictionPolicy};
pub use config::Config;
pub use error::{CacheError, Result};
