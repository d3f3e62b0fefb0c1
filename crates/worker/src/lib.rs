//! Scheduled content tasks.
//!
//! [`run`] is the publish loop. The `tunobase-worker` binary drives it for
//! deployments that keep the API free of scheduled work; otherwise the API
//! spawns it in-process.

pub mod config;

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tunobase_db::repositories::VersionRepo;

/// Run one publish pass, logging the outcome.
///
/// Returns the number of versions published, or `0` when the pass failed.
pub async fn publish_pass(pool: &PgPool) -> u64 {
    match VersionRepo::publish_objects(pool).await {
        Ok(published) => {
            if published > 0 {
                tracing::info!(published, "Published due content");
            } else {
                tracing::debug!("Nothing due for publishing");
            }
            published
        }
        Err(e) => {
            tracing::error!(error = %e, "Publish pass failed");
            0
        }
    }
}

/// Repeat [`publish_pass`] every `interval` until `cancel` fires.
///
/// Failures are logged and the loop carries on with the next tick.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Publish loop started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                publish_pass(&pool).await;
            }
        }
    }

    tracing::info!("Publish loop stopped");
}
