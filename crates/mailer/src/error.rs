use tunobase_core::error::CoreError;

/// Error type for composing, sending, and tracking email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// A template failed to parse or render.
    #[error("Email template error: {0}")]
    Template(#[from] tera::Error),

    /// A recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The recipient list was rejected before building the message.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(String),

    /// Sending is enabled but no transport is configured.
    #[error("Email is enabled but {0} is not set")]
    NotConfigured(&'static str),

    /// Writing a tracking row failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
