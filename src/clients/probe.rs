//! Startup readiness probe

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::Result;

/// Runs `probe` until it succeeds or `retries` attempts are used up.
///
/// Attempts are spaced by a fixed `delay`. Returns whether the dependency
/// became ready. Failure is logged, never fatal: the service still starts
/// and answers "dependency unavailable" until the collaborator comes up.
pub async fn wait_for_dependency<F, Fut>(
    name: &str,
    retries: u32,
    delay: Duration,
    mut probe: F,
) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    for attempt in 1..=retries {
        match probe().await {
            Ok(()) => {
                info!("{} is ready", name);
                return true;
            }
            Err(e) => {
                warn!(
                    "Attempt {}/{}: {} not ready ({}). Retrying in {}s...",
                    attempt,
                    retries,
                    name,
                    e,
                    delay.as_secs()
                );
                if attempt < retries {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    warn!("{} still unavailable after {} attempts, continuing", name, retries);
    false
}
