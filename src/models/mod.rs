//! Request and Response models for the cache service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, including the
//! payloads exchanged with the scoring and storage services.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{HitRequest, QueryRequest, ScoreRequest, MAX_QUESTION_LENGTH};
pub use responses::{
    ErrorResponse, HealthResponse, QueryResponse, RootResponse, ScoreResult, StatsResponse,
};
