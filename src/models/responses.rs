//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::{EvictionPolicy, StatsSnapshot};

/// Result produced by the scoring service and stored in the cache
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoreResult {
    pub question: String,
    #[serde(default)]
    pub original_answer: Option<String>,
    pub llm_answer: String,
    /// Cosine similarity between the original and generated answers
    pub score: f64,
}

/// Response body for POST /query
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryResponse {
    /// Answer served from the cache
    Hit { message: String, data: ScoreResult },
    /// Answer freshly computed by the scoring service
    Miss { data_from_score: ScoreResult },
}

impl QueryResponse {
    pub fn hit(data: ScoreResult) -> Self {
        QueryResponse::Hit {
            message: "Answer served from the cache.".to_string(),
            data,
        }
    }

    pub fn miss(data: ScoreResult) -> Self {
        QueryResponse::Miss {
            data_from_score: data,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub size: usize,
    pub capacity: usize,
    pub policy: EvictionPolicy,
    /// TTL in seconds, 0 when disabled
    pub ttl: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// Hit rate rounded to two decimals
    pub hit_rate: f64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            size: stats.size,
            capacity: stats.capacity,
            policy: stats.policy,
            ttl: stats.ttl,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            hit_rate: (stats.hit_rate * 100.0).round() / 100.0,
        }
    }
}

/// Response body for GET /
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub cache_size: usize,
}

impl RootResponse {
    pub fn new(cache_size: usize) -> Self {
        Self {
            message: "Cache service is running.".to_string(),
            cache_size,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScoreResult {
        ScoreResult {
            question: "q".to_string(),
            original_answer: Some("a".to_string()),
            llm_answer: "b".to_string(),
            score: 0.87,
        }
    }

    #[test]
    fn test_hit_response_serialize() {
        let json = serde_json::to_value(QueryResponse::hit(sample())).unwrap();
        assert_eq!(json["status"], "hit");
        assert!(json["message"].is_string());
        assert_eq!(json["data"]["llm_answer"], "b");
    }

    #[test]
    fn test_miss_response_serialize() {
        let json = serde_json::to_value(QueryResponse::miss(sample())).unwrap();
        assert_eq!(json["status"], "miss");
        assert_eq!(json["data_from_score"]["score"], 0.87);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_stats_response_rounds_hit_rate() {
        let snapshot = StatsSnapshot {
            size: 1,
            capacity: 10,
            policy: EvictionPolicy::Lru,
            ttl: 0,
            hits: 2,
            misses: 1,
            evictions: 0,
            expirations: 0,
            hit_rate: 2.0 / 3.0,
        };
        let resp = StatsResponse::from(snapshot);
        assert_eq!(resp.hit_rate, 0.67);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["policy"], "LRU");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_score_result_without_original_answer() {
        let json = r#"{"question": "q", "llm_answer": "b", "score": 0.1}"#;
        let result: ScoreResult = serde_json::from_str(json).unwrap();
        assert!(result.original_answer.is_none());
    }
}
