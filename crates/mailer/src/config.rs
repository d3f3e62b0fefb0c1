//! Mailer configuration loaded from environment variables.

use tunobase_core::mail::parse_address_list;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `DEFAULT_FROM_EMAIL` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@tunobase.local";

const DEFAULT_APP_NAME: &str = "Tunobase";
const DEFAULT_STATIC_URL: &str = "/static/";
const DEFAULT_TEMPLATE_DIR: &str = "templates/email";

/// Configuration for composing and sending email.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// When false, sends and tracking writes are skipped.
    pub enabled: bool,
    /// SMTP server hostname. Required when `enabled`.
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Sender used when a message does not name one.
    pub default_from_email: String,
    /// Addresses blind-copied on every message.
    pub extra_bcc: Vec<String>,
    /// Exposed to templates as `app_name`.
    pub app_name: String,
    /// Exposed to templates as `STATIC_URL`.
    pub static_url: String,
    /// Directory searched for named email templates.
    pub template_dir: String,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: None,
            smtp_port: DEFAULT_SMTP_PORT,
            smtp_user: None,
            smtp_password: None,
            default_from_email: DEFAULT_FROM_ADDRESS.to_string(),
            extra_bcc: Vec::new(),
            app_name: DEFAULT_APP_NAME.to_string(),
            static_url: DEFAULT_STATIC_URL.to_string(),
            template_dir: DEFAULT_TEMPLATE_DIR.to_string(),
        }
    }
}

impl MailerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable               | Required        | Default                  |
    /// |------------------------|-----------------|--------------------------|
    /// | `EMAIL_ENABLED`        | no              | `false`                  |
    /// | `SMTP_HOST`            | when enabled    | (none)                   |
    /// | `SMTP_PORT`            | no              | `587`                    |
    /// | `SMTP_USER`            | no              | (none)                   |
    /// | `SMTP_PASSWORD`        | no              | (none)                   |
    /// | `DEFAULT_FROM_EMAIL`   | no              | `noreply@tunobase.local` |
    /// | `EMAIL_EXTRA_BCC_LIST` | no              | (empty, comma separated) |
    /// | `APP_NAME`             | no              | `Tunobase`               |
    /// | `STATIC_URL`           | no              | `/static/`               |
    /// | `EMAIL_TEMPLATE_DIR`   | no              | `templates/email`        |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("EMAIL_ENABLED")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            smtp_host: std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty()),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.smtp_port),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            default_from_email: std::env::var("DEFAULT_FROM_EMAIL")
                .unwrap_or(defaults.default_from_email),
            extra_bcc: std::env::var("EMAIL_EXTRA_BCC_LIST")
                .map(|v| parse_address_list(&v))
                .unwrap_or_default(),
            app_name: std::env::var("APP_NAME").unwrap_or(defaults.app_name),
            static_url: std::env::var("STATIC_URL").unwrap_or(defaults.static_url),
            template_dir: std::env::var("EMAIL_TEMPLATE_DIR").unwrap_or(defaults.template_dir),
        }
    }
}

/// Interpret common truthy spellings (`true`, `1`, `yes`, `on`).
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_disabled() {
        let config = MailerConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.default_from_email, "noreply@tunobase.local");
        assert!(config.extra_bcc.is_empty());
    }

    #[test]
    fn truthy_values() {
        assert!(parse_bool("true"));
        assert!(parse_bool(" YES "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }
}
