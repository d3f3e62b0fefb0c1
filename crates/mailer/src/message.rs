//! Outgoing message representation and conversion to a MIME message.

use lettre::message::header::ContentType;
use lettre::message::{Attachment as MimeAttachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use serde::Deserialize;

use crate::error::MailError;

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// What a caller wants sent. Parts may be template names or literal content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MailRequest {
    pub subject: String,
    pub text_content: String,
    pub to: Vec<String>,
    /// Sender; the configured default when absent.
    pub from: Option<String>,
    pub bcc: Option<Vec<String>>,
    pub html_content: Option<String>,
    /// Extra template context. `site` and `user` are filled in when absent.
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
    /// Render literal parts as templates too.
    #[serde(default)]
    pub apply_context_to_string: bool,
}

/// A fully rendered message, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: Vec<String>,
    /// Caller BCC list followed by the configured extras.
    pub bcc: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl OutgoingMessage {
    /// Build the MIME message: plain text, with an HTML alternative and
    /// attachments when present.
    pub fn to_mime(&self) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.parse::<Mailbox>()?)
            .subject(self.subject.clone());
        for to in &self.to {
            builder = builder.to(to.parse::<Mailbox>()?);
        }
        for bcc in &self.bcc {
            builder = builder.bcc(bcc.parse::<Mailbox>()?);
        }

        if self.html.is_none() && self.attachments.is_empty() {
            return builder
                .header(ContentType::TEXT_PLAIN)
                .body(self.text.clone())
                .map_err(|e| MailError::Build(e.to_string()));
        }

        let mut body = match &self.html {
            Some(html) => MultiPart::mixed().multipart(MultiPart::alternative_plain_html(
                self.text.clone(),
                html.clone(),
            )),
            None => MultiPart::mixed().singlepart(SinglePart::plain(self.text.clone())),
        };
        for attachment in &self.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::Build(e.to_string()))?;
            body = body.singlepart(
                MimeAttachment::new(attachment.filename.clone())
                    .body(attachment.content.clone(), content_type),
            );
        }

        builder
            .multipart(body)
            .map_err(|e| MailError::Build(e.to_string()))
    }
}
