//! Scoring service client

use std::time::Duration;

use async_trait::async_trait;
use tracing::error;

use crate::error::{CacheError, Result};
use crate::models::{ScoreRequest, ScoreResult};

// == Scorer Trait ==
/// Produces a scored answer for a question the cache has not seen.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Any failure is reported as `CacheError::DependencyUnavailable`.
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult>;
}

// == HTTP Scorer ==
/// Scorer backed by the scoring service's `POST /score` endpoint.
#[derive(Debug, Clone)]
pub struct HttpScorer {
    http_client: reqwest::Client,
    url: String,
}

impl HttpScorer {
    /// Creates a client posting to `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http_client: super::http_client(timeout)?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Scorer for HttpScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult> {
        let response = self
            .http_client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Could not reach scoring service at {}: {}", self.url, e);
                CacheError::unavailable("The scoring service is not available.")
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Scoring service answered with status {}", status);
            return Err(CacheError::unavailable(format!(
                "The scoring service answered with status {}.",
                status
            )));
        }

        response.json::<ScoreResult>().await.map_err(|e| {
            error!("Scoring service returned an unreadable body: {}", e);
            CacheError::unavailable("The scoring service returned an invalid response.")
        })
    }
}
