//! API Routes
//!
//! Configures the Axum router with all cache service endpoints.

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use super::handlers::{health_handler, query_handler, root_handler, stats_handler, AppState};
use crate::error::CacheError;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /query` - Answer a question from the cache or the scoring service
/// - `GET /stats` - Get cache statistics
/// - `GET /` - Liveness banner with the current cache size
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
/// - Panic guard: turns a handler panic into a JSON 500
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/", get(root_handler))
        .route("/query", post(query_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    error!("Request handler panicked");
    CacheError::Internal("Internal cache service error.".to_string()).into_response()
}
