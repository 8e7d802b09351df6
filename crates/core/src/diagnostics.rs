//! Accumulated (summary, detail) diagnostics reported back to the host.
//!
//! Mappers push every problem they find instead of stopping at the first one, so a
//! single apply shows all of them. Secret values registered on the collection are
//! masked in everything it records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Replacement text for redacted secret values.
pub const REDACTED: &str = "***";

/// Summary used when the host cancels an in-flight operation.
pub const CANCELED_SUMMARY: &str = "Operation canceled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Attribute path, e.g. `"rules[0].threshold.warning"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({path}): {}", self.summary, self.detail),
            None => write!(f, "{}: {}", self.summary, self.detail),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    secrets: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a collection holding one error.
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        let mut diags = Self::new();
        diags.add_error(summary, detail);
        diags
    }

    /// Register a secret value; it is masked in existing and future entries.
    pub fn register_secret(&mut self, secret: impl Into<String>) {
        let secret = secret.into();
        if secret.is_empty() || self.secrets.contains(&secret) {
            return;
        }
        for entry in &mut self.entries {
            entry.summary = entry.summary.replace(&secret, REDACTED);
            entry.detail = entry.detail.replace(&secret, REDACTED);
        }
        self.secrets.push(secret);
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Error, summary.into(), detail.into(), None);
    }

    pub fn add_attribute_error(
        &mut self,
        path: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(Severity::Error, summary.into(), detail.into(), Some(path.into()));
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Warning, summary.into(), detail.into(), None);
    }

    /// Move all entries (and registered secrets) of `other` into `self`.
    pub fn append(&mut self, other: Diagnostics) {
        for secret in other.secrets {
            self.register_secret(secret);
        }
        for entry in other.entries {
            self.push(entry.severity, entry.summary, entry.detail, entry.path);
        }
    }

    pub fn has_error(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Error)
    }

    /// True when any entry carries `summary`.
    pub fn contains_summary(&self, summary: &str) -> bool {
        self.entries.iter().any(|d| d.summary == summary)
    }

    /// `Err(self)` when an error was recorded, otherwise `Ok(value)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Diagnostics> {
        if self.has_error() {
            Err(self)
        } else {
            Ok(value)
        }
    }

    fn push(&mut self, severity: Severity, summary: String, detail: String, path: Option<String>) {
        let entry = Diagnostic {
            severity,
            summary: self.redact(summary),
            detail: self.redact(detail),
            path,
        };
        self.entries.push(entry);
    }

    fn redact(&self, mut text: String) -> String {
        for secret in &self.secrets {
            if text.contains(secret.as_str()) {
                text = text.replace(secret.as_str(), REDACTED);
            }
        }
        text
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.entries.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for Diagnostics {}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
