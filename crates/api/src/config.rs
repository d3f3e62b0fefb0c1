use crate::auth::jwt::JwtConfig;

/// Default interval between scheduled publish passes.
const DEFAULT_PUBLISH_INTERVAL_SECS: u64 = 60;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background tasks get to stop after shutdown begins.
    pub shutdown_timeout_secs: u64,
    /// Staging deployments show staged content to visitors.
    pub staging: bool,
    /// Domain of the site this deployment serves.
    pub site_domain: String,
    /// Seconds between scheduled publish passes; `0` disables the
    /// in-process scheduler.
    pub publish_interval_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `STAGING`               | `false`                    |
    /// | `SITE_DOMAIN`           | `localhost`                |
    /// | `PUBLISH_INTERVAL_SECS` | `60`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let staging = std::env::var("STAGING")
            .map(|v| tunobase_mailer::config::parse_bool(&v))
            .unwrap_or(false);

        let site_domain = std::env::var("SITE_DOMAIN").unwrap_or_else(|_| "localhost".into());

        let publish_interval_secs: u64 = std::env::var("PUBLISH_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_PUBLISH_INTERVAL_SECS.to_string())
            .parse()
            .expect("PUBLISH_INTERVAL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            staging,
            site_domain,
            publish_interval_secs,
            jwt,
        }
    }
}
