//! API Module
//!
//! HTTP handlers and routing for the cache service REST API.
//!
//! # Endpoints
//! - `POST /query` - Answer a question, from the cache when possible
//! - `GET /stats` - Get cache statistics
//! - `GET /` - Liveness banner
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
