//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies and of the payload
//! forwarded to the scoring service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum accepted question length in bytes
pub const MAX_QUESTION_LENGTH: usize = 8 * 1024;

/// Request body for POST /query
///
/// Only `question` is interpreted. Every other field is carried through to
/// the scoring service untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QueryRequest {
    /// The question used as cache key
    #[serde(default)]
    pub question: Option<String>,
    /// Reference answer the scorer compares against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_answer: Option<String>,
    /// Any additional fields sent by the caller
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QueryRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.question.as_deref() {
            None | Some("") => Some("The 'question' field is required".to_string()),
            Some(q) if q.len() > MAX_QUESTION_LENGTH => Some(format!(
                "Question exceeds maximum length of {} bytes",
                MAX_QUESTION_LENGTH
            )),
            Some(_) => None,
        }
    }

    /// Builds the payload for the scoring service.
    ///
    /// Call only after `validate` succeeded.
    pub fn into_score_request(self) -> ScoreRequest {
        ScoreRequest {
            question: self.question.unwrap_or_default(),
            original_answer: self.original_answer,
            extra: self.extra,
        }
    }
}

/// Payload sent to the scoring service
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoreRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_answer: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScoreRequest {
    pub fn new(question: impl Into<String>, original_answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            original_answer: Some(original_answer.into()),
            extra: Map::new(),
        }
    }
}

/// Payload sent to the storage service's hit counter
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HitRequest {
    pub question: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_deserialize() {
        let json = r#"{"question": "why?", "original_answer": "because"}"#;
        let req: QueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.question.as_deref(), Some("why?"));
        assert_eq!(req.original_answer.as_deref(), Some("because"));
        assert!(req.extra.is_empty());
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_extra_fields_forwarded() {
        let json = r#"{"question": "q", "original_answer": "a", "id": 42}"#;
        let req: QueryRequest = serde_json::from_str(json).unwrap();

        let score_req = req.into_score_request();
        let forwarded = serde_json::to_value(&score_req).unwrap();
        assert_eq!(forwarded["id"], 42);
        assert_eq!(forwarded["question"], "q");
        assert_eq!(forwarded["original_answer"], "a");
    }

    #[test]
    fn test_validate_missing_question() {
        let req: QueryRequest = serde_json::from_str(r#"{"original_answer": "a"}"#).unwrap();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_empty_question() {
        let req = QueryRequest {
            question: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_question_too_long() {
        let req = QueryRequest {
            question: Some("x".repeat(MAX_QUESTION_LENGTH + 1)),
            ..Default::default()
        };
        assert!(req.validate().is_some());
    }
}
