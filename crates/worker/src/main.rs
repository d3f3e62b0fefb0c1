use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tunobase_worker::config::WorkerConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunobase_worker=debug,tunobase_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();

    let pool = tunobase_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tunobase_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    // A single pass for cron-style invocation: `tunobase-worker once`.
    if std::env::args().nth(1).as_deref() == Some("once") {
        let published = tunobase_worker::publish_pass(&pool).await;
        tracing::info!(published, "Single publish pass complete");
        return;
    }

    let cancel = CancellationToken::new();
    let handle = tokio::spawn(tunobase_worker::run(
        pool,
        config.publish_interval(),
        cancel.clone(),
    ));

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl-C handler");
    tracing::info!("Received SIGINT (Ctrl-C), stopping worker");

    cancel.cancel();
    let _ = handle.await;

    tracing::info!("Worker stopped");
}
