//! Admin handlers for outbound email: the tracking log and a test send.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tunobase_core::pagination::paginate;
use tunobase_db::repositories::{OutboundEmailRepo, UserRepo};
use tunobase_mailer::MailRequest;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Body of a test email request.
#[derive(Debug, Deserialize)]
pub struct TestEmailRequest {
    pub to: Vec<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// GET /api/v1/admin/outbound-emails?page=&paginate_by=
///
/// Tracked messages for the current site, newest first.
pub async fn list_outbound_emails(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let per_page = params.per_page();
    let total = OutboundEmailRepo::count(&state.pool, state.site_scope()).await?;
    let page = paginate(total, params.page(), per_page)?;

    let object_list = OutboundEmailRepo::list(
        &state.pool,
        state.site_scope(),
        per_page,
        page.offset(per_page),
    )
    .await?;

    Ok(Json(DataResponse {
        data: PageResponse { object_list, page },
    }))
}

/// POST /api/v1/admin/test-email
///
/// Send a short message through the configured transport so an operator
/// can check delivery. Tracked like any other message.
pub async fn send_test_email(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<TestEmailRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, admin.user_id).await?;

    let request = MailRequest {
        subject: input
            .subject
            .unwrap_or_else(|| "Test email from {{ app_name }}".into()),
        text_content: input.message.unwrap_or_else(|| {
            "This is a test message sent from {{ site.domain }}.".into()
        }),
        to: input.to,
        apply_context_to_string: true,
        ..MailRequest::default()
    };

    let sent = state
        .mailer
        .send_mail(&state.pool, &request, &state.site, user.as_ref())
        .await?;

    tracing::info!(
        user_id = admin.user_id,
        recipients = sent.to.len(),
        enabled = state.mailer.config().enabled,
        "Test email requested"
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "subject": sent.subject,
            "to": sent.to,
            "sent": state.mailer.config().enabled,
        }),
    }))
}
