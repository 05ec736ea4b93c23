//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStore, StatsSnapshot};
use crate::clients::{HitRecorder, HttpScorer, HttpStorage, Scorer};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    HealthResponse, QueryRequest, QueryResponse, RootResponse, ScoreResult, StatsResponse,
};

/// The question cache as shared between handlers.
pub type SharedCache = Arc<RwLock<CacheStore<String, ScoreResult>>>;

/// Application state shared across all handlers.
///
/// The cache sits behind one lock covering the entry map, the policy order
/// and the counters. Collaborator calls are made with the lock released.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
    /// Produces answers on a miss
    pub scorer: Arc<dyn Scorer>,
    /// Notified on every hit
    pub hits: Arc<dyn HitRecorder>,
}

impl AppState {
    /// Creates a new AppState with the given cache store and collaborators.
    pub fn new(
        cache: CacheStore<String, ScoreResult>,
        scorer: Arc<dyn Scorer>,
        hits: Arc<dyn HitRecorder>,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            scorer,
            hits,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// `CacheError::Configuration` for a zero capacity, an unknown policy
    /// tag or an HTTP client that cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::from_tag(
            config.cache_size,
            &config.cache_policy,
            Duration::from_secs(config.cache_ttl),
        )?;
        let scorer = HttpScorer::new(
            config.score_service_url.clone(),
            Duration::from_secs(config.score_timeout),
        )?;
        let storage = HttpStorage::new(
            config.storage_service_url.clone(),
            Duration::from_secs(config.storage_timeout),
        )?;
        Ok(Self::new(cache, Arc::new(scorer), Arc::new(storage)))
    }

    /// Looks a question up in the cache.
    pub async fn lookup(&self, question: &str) -> Option<ScoreResult> {
        // get mutates recency, frequency and counters, so it needs the write lock
        let mut cache = self.cache.write().await;
        cache.get(&question.to_string())
    }

    /// Stores a scored answer under its question.
    pub async fn store(&self, question: String, value: ScoreResult) {
        let mut cache = self.cache.write().await;
        cache.put(question, value);
    }

    /// Returns the current cache statistics.
    pub async fn snapshot_stats(&self) -> StatsSnapshot {
        let cache = self.cache.read().await;
        cache.stats()
    }

    /// Fires a hit notification on a background task.
    fn notify_hit(&self, question: String) {
        let recorder = Arc::clone(&self.hits);
        tokio::spawn(async move {
            if let Err(e) = recorder.record_hit(&question).await {
                warn!("Could not notify storage of a hit for '{}': {}", preview(&question), e);
            }
        });
    }
}

/// First 80 characters of a question, for logs.
fn preview(question: &str) -> String {
    question.chars().take(80).collect()
}

/// Handler for POST /query
///
/// Serves the answer from the cache when possible, otherwise asks the
/// scoring service and caches its result. A scoring failure is returned as
/// 503 and nothing is cached.
pub async fn query_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>> {
    let Json(req) = payload.map_err(|e| CacheError::InvalidRequest(e.body_text()))?;

    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let request = req.into_score_request();
    let question = request.question.clone();
    debug!("Received question: '{}'", preview(&question));

    if let Some(cached) = state.lookup(&question).await {
        debug!("Cache HIT for '{}'", preview(&question));
        state.notify_hit(question);
        return Ok(Json(QueryResponse::hit(cached)));
    }

    debug!("Cache MISS for '{}', asking the scoring service", preview(&question));
    let scored = state.scorer.score(&request).await?;
    state.store(question, scored.clone()).await;

    Ok(Json(QueryResponse::miss(scored)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.snapshot_stats().await.into())
}

/// Handler for GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<RootResponse> {
    let cache = state.cache.read().await;
    Json(RootResponse::new(cache.len()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
