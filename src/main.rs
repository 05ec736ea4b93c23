//! Query Cache - question cache in front of a scoring service
//!
//! Binary entry point: loads configuration, builds the cache and its
//! collaborators, and serves the HTTP API.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use query_cache::api::{create_router, AppState};
use query_cache::clients::{wait_for_dependency, HttpStorage};
use query_cache::Config;

/// Main entry point for the cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache store and collaborator clients
/// 4. Probe the storage service until it answers (non-fatal)
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "query_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting query cache service");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: cache_size={}, policy={}, ttl={}s, port={}, score_url={}, storage_url={}",
        config.cache_size,
        config.cache_policy,
        config.cache_ttl,
        config.server_port,
        config.score_service_url,
        config.storage_service_url
    );

    let state = AppState::from_config(&config).context("failed to build cache")?;
    info!("Cache store initialized");

    let storage = HttpStorage::new(
        config.storage_service_url.clone(),
        Duration::from_secs(config.storage_timeout),
    )
    .context("failed to build storage client")?;
    wait_for_dependency(
        "storage service",
        config.startup_probe_retries,
        Duration::from_secs(config.startup_probe_delay),
        || storage.health(),
    )
    .await;

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
