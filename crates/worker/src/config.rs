use std::time::Duration;

/// Default interval between publish passes.
const DEFAULT_PUBLISH_INTERVAL_SECS: u64 = 60;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    /// Seconds between publish passes.
    pub publish_interval_secs: u64,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `DATABASE_URL`          | **yes**  | --      |
    /// | `PUBLISH_INTERVAL_SECS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is missing or the interval is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let publish_interval_secs: u64 = std::env::var("PUBLISH_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_PUBLISH_INTERVAL_SECS.to_string())
            .parse()
            .expect("PUBLISH_INTERVAL_SECS must be a valid u64");
        assert!(
            publish_interval_secs > 0,
            "PUBLISH_INTERVAL_SECS must be greater than zero"
        );

        Self {
            database_url,
            publish_interval_secs,
        }
    }

    pub fn publish_interval(&self) -> Duration {
        Duration::from_secs(self.publish_interval_secs)
    }
}
