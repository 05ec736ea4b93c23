//! Clients Module
//!
//! Boundary calls to the collaborating services: the scorer that produces an
//! answer on a cache miss, and the storage service that counts cache hits.
//! Both sit behind traits so handlers can be exercised without a network.

mod probe;
mod scorer;
mod storage;

pub use probe::wait_for_dependency;
pub use scorer::{HttpScorer, Scorer};
pub use storage::{HitRecorder, HttpStorage};

use std::time::Duration;

use crate::error::{CacheError, Result};

/// Builds a reqwest client with a whole-request timeout.
fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CacheError::configuration(format!("Failed to create HTTP client: {}", e)))
}
