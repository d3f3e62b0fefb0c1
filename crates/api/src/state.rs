use std::sync::Arc;

use tunobase_core::site::SiteScope;
use tunobase_core::state::ContentState;
use tunobase_db::models::site::Site;
use tunobase_mailer::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tunobase_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The site this deployment serves, resolved at start-up.
    pub site: Arc<Site>,
    /// Outbound email composer and sender.
    pub mailer: Arc<Mailer>,
}

impl AppState {
    /// Scope that narrows queries to the current site.
    pub fn site_scope(&self) -> SiteScope {
        SiteScope::Site(self.site.id)
    }

    /// The state visitor-facing queries select in this deployment.
    pub fn site_state(&self) -> ContentState {
        ContentState::site_state(self.config.staging)
    }
}
