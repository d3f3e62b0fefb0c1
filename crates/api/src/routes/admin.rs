//! Admin-only route definitions.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{outbound_email, tags};
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// DELETE /tags/{id}                 -> delete_tag
/// GET    /outbound-emails           -> list_outbound_emails
/// POST   /test-email                -> send_test_email
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags/{id}", delete(tags::delete_tag))
        .route(
            "/outbound-emails",
            get(outbound_email::list_outbound_emails),
        )
        .route("/test-email", post(outbound_email::send_test_email))
}
