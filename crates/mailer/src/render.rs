//! Template rendering for email parts.
//!
//! Every part of a message (subject, text body, HTML body) is first looked
//! up as a template name. Parts that are not template names are either
//! rendered as inline templates or used verbatim. Inline HTML bodies are
//! autoescaped; subjects and text bodies are not.

use std::path::Path;

use tera::{Context, Tera};

use crate::error::MailError;

/// Rendered message parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// Named email templates.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Load every template under `dir`. A missing directory yields a
    /// renderer with no named templates.
    pub fn from_dir(dir: &str) -> Result<Self, MailError> {
        if !Path::new(dir).is_dir() {
            tracing::debug!(dir, "Email template directory not found, using inline content only");
            return Ok(Self::empty());
        }
        let tera = Tera::new(&format!("{}/**/*", dir.trim_end_matches('/')))?;
        tracing::info!(dir, count = tera.get_template_names().count(), "Loaded email templates");
        Ok(Self { tera })
    }

    /// A renderer with no named templates.
    pub fn empty() -> Self {
        Self {
            tera: Tera::default(),
        }
    }

    /// Register a named template from a string.
    pub fn add_template(&mut self, name: &str, content: &str) -> Result<(), MailError> {
        self.tera.add_raw_template(name, content)?;
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render one part: a named template if one exists, otherwise the part
    /// itself, run through the template engine when `apply_context_to_string`
    /// is set. `autoescape` applies to inline rendering only; named templates
    /// escape by file extension.
    pub fn render_part(
        &self,
        part: &str,
        context: &Context,
        apply_context_to_string: bool,
        autoescape: bool,
    ) -> Result<String, MailError> {
        if self.has_template(part) {
            return Ok(self.tera.render(part, context)?);
        }
        if apply_context_to_string {
            return Ok(Tera::one_off(part, context, autoescape)?);
        }
        Ok(part.to_string())
    }

    /// Render the subject, text body, and optional HTML body of a message.
    ///
    /// Subjects are flattened to a single line.
    pub fn render_content(
        &self,
        subject: &str,
        text: &str,
        html: Option<&str>,
        context: &Context,
        apply_context_to_string: bool,
    ) -> Result<RenderedContent, MailError> {
        let subject = self.render_part(subject, context, apply_context_to_string, false)?;
        let text = self.render_part(text, context, apply_context_to_string, false)?;
        let html = html
            .map(|h| self.render_part(h, context, apply_context_to_string, true))
            .transpose()?;

        Ok(RenderedContent {
            subject: single_line(&subject),
            text,
            html,
        })
    }
}

fn single_line(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
