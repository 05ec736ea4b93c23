//! Storage service client
//!
//! The storage service persists scored answers (idempotently, keyed by
//! question) and keeps a per-question hit counter. The cache only ever
//! bumps that counter.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CacheError, Result};
use crate::models::HitRequest;

// == Hit Recorder Trait ==
/// Receives a notification every time a question is served from the cache.
#[async_trait]
pub trait HitRecorder: Send + Sync {
    async fn record_hit(&self, question: &str) -> Result<()>;
}

// == HTTP Storage ==
/// Client for the storage service's `/hit` and `/health` endpoints.
#[derive(Debug, Clone)]
pub struct HttpStorage {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpStorage {
    /// Creates a client for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url: String = base_url.into();
        Ok(Self {
            http_client: super::http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks that the storage service is up and reaches its database.
    pub async fn health(&self) -> Result<()> {
        let response = self
            .http_client
            .get(self.endpoint("/health"))
            .send()
            .await
            .map_err(|e| CacheError::unavailable(format!("storage service unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(CacheError::unavailable(format!(
                "storage health check returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CacheError::unavailable(format!("invalid health response: {}", e)))?;
        match body.get("status").and_then(|s| s.as_str()) {
            Some("ok") => Ok(()),
            _ => Err(CacheError::unavailable(format!(
                "storage service reports unhealthy: {}",
                body
            ))),
        }
    }
}

#[async_trait]
impl HitRecorder for HttpStorage {
    async fn record_hit(&self, question: &str) -> Result<()> {
        let payload = HitRequest {
            question: question.to_string(),
        };
        let response = self
            .http_client
            .post(self.endpoint("/hit"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| CacheError::unavailable(format!("storage service unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(CacheError::unavailable(format!(
                "storage service answered with status {}",
                response.status()
            )));
        }
        Ok(())
    }
}
