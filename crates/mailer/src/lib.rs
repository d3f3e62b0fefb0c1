//! Outbound email: template rendering, sending, and tracking.
//!
//! [`Mailer::send_mail`] renders a [`MailRequest`], hands it to the
//! configured [`MailTransport`], and records an `outbound_emails` row.
//! With `EMAIL_ENABLED` off nothing is sent or recorded.

pub mod config;
pub mod error;
pub mod message;
pub mod render;
pub mod transport;

use std::sync::Arc;

use sqlx::PgPool;
use tera::Context;
use tunobase_core::mail::{merge_bcc, validate_recipients};
use tunobase_db::models::outbound_email::{CreateOutboundEmail, OutboundEmail};
use tunobase_db::models::site::Site;
use tunobase_db::models::user::User;
use tunobase_db::repositories::OutboundEmailRepo;

pub use config::MailerConfig;
pub use error::MailError;
pub use message::{Attachment, MailRequest, OutgoingMessage};
pub use render::{RenderedContent, Renderer};
pub use transport::{MailTransport, MemoryTransport, SmtpTransport};

/// Composes, sends, and tracks email.
pub struct Mailer {
    config: MailerConfig,
    renderer: Renderer,
    transport: Arc<dyn MailTransport>,
}

impl Mailer {
    pub fn new(config: MailerConfig, renderer: Renderer, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            config,
            renderer,
            transport,
        }
    }

    /// Build a mailer from configuration: templates from the configured
    /// directory, SMTP when enabled, an in-memory sink otherwise.
    pub fn from_config(config: MailerConfig) -> Result<Self, MailError> {
        let renderer = Renderer::from_dir(&config.template_dir)?;
        let transport: Arc<dyn MailTransport> = if config.enabled {
            Arc::new(SmtpTransport::from_config(&config)?)
        } else {
            Arc::new(MemoryTransport::new())
        };
        Ok(Self::new(config, renderer, transport))
    }

    pub fn config(&self) -> &MailerConfig {
        &self.config
    }

    /// Render subject and bodies; see [`Renderer::render_content`].
    pub fn render_content(
        &self,
        subject: &str,
        text: &str,
        html: Option<&str>,
        context: &Context,
        apply_context_to_string: bool,
    ) -> Result<RenderedContent, MailError> {
        self.renderer
            .render_content(subject, text, html, context, apply_context_to_string)
    }

    /// Template context for a request: the caller's values plus `site`,
    /// `user` (unless supplied), `STATIC_URL`, and `app_name`.
    pub fn build_context(
        &self,
        request: &MailRequest,
        site: &Site,
        user: Option<&User>,
    ) -> Result<Context, MailError> {
        let mut values = request.context.clone();
        if !values.contains_key("site") {
            values.insert("site".into(), to_value(site)?);
        }
        if !values.contains_key("user") {
            values.insert("user".into(), to_value(&user)?);
        }
        values.insert(
            "STATIC_URL".into(),
            serde_json::Value::String(self.config.static_url.clone()),
        );
        values.insert(
            "app_name".into(),
            serde_json::Value::String(self.config.app_name.clone()),
        );
        Ok(Context::from_value(serde_json::Value::Object(values))?)
    }

    /// Render a request into a message. The BCC list gains the configured
    /// extra recipients.
    pub fn create_message(
        &self,
        request: &MailRequest,
        site: &Site,
        user: Option<&User>,
    ) -> Result<OutgoingMessage, MailError> {
        validate_recipients(&request.to)?;

        let context = self.build_context(request, site, user)?;
        let content = self.render_content(
            &request.subject,
            &request.text_content,
            request.html_content.as_deref(),
            &context,
            request.apply_context_to_string,
        )?;

        Ok(OutgoingMessage {
            from: request
                .from
                .clone()
                .unwrap_or_else(|| self.config.default_from_email.clone()),
            to: request.to.clone(),
            bcc: merge_bcc(request.bcc.as_deref(), &self.config.extra_bcc),
            subject: content.subject,
            text: content.text,
            html: content.html,
            attachments: request.attachments.clone(),
        })
    }

    /// Send messages in order, stopping at the first transport failure.
    /// A no-op when email is disabled.
    pub async fn send_messages(&self, messages: &[OutgoingMessage]) -> Result<(), MailError> {
        if !self.config.enabled {
            tracing::debug!(
                count = messages.len(),
                "Not sending mail because EMAIL_ENABLED is false"
            );
            return Ok(());
        }
        for message in messages {
            self.transport.send(message).await?;
        }
        Ok(())
    }

    /// Record one sent message. Returns `None` when email is disabled.
    pub async fn track_mail(
        &self,
        pool: &PgPool,
        input: &CreateOutboundEmail,
    ) -> Result<Option<OutboundEmail>, MailError> {
        if !self.config.enabled {
            return Ok(None);
        }
        Ok(Some(OutboundEmailRepo::create(pool, input).await?))
    }

    /// Record a batch of sent messages. Returns the number written.
    pub async fn save_outbound_emails(
        &self,
        pool: &PgPool,
        inputs: &[CreateOutboundEmail],
    ) -> Result<u64, MailError> {
        if !self.config.enabled {
            return Ok(0);
        }
        Ok(OutboundEmailRepo::create_many(pool, inputs).await?)
    }

    /// Create, send, and track one message.
    ///
    /// Send failures are returned. Tracking is best-effort: a failed
    /// tracking write is logged and the send still counts as done.
    pub async fn send_mail(
        &self,
        pool: &PgPool,
        request: &MailRequest,
        site: &Site,
        user: Option<&User>,
    ) -> Result<OutgoingMessage, MailError> {
        let message = self.create_message(request, site, user)?;
        self.send_messages(std::slice::from_ref(&message)).await?;

        let tracking = CreateOutboundEmail {
            user_id: user.map(|u| u.id),
            to_addresses: request.to.clone(),
            bcc_addresses: request.bcc.clone(),
            subject: message.subject.clone(),
            message: message.html.clone().unwrap_or_else(|| message.text.clone()),
            site_id: site.id,
        };
        if let Err(e) = self.track_mail(pool, &tracking).await {
            tracing::warn!(error = %e, subject = %message.subject, "Failed to record outbound email");
        }

        Ok(message)
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, MailError> {
    serde_json::to_value(value).map_err(|e| MailError::Build(e.to_string()))
}
