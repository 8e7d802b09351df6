use std::env;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ENV_API_TOKEN: &str = "INSTANA_API_TOKEN";
pub const ENV_ENDPOINT: &str = "INSTANA_ENDPOINT";
pub const ENV_TLS_SKIP_VERIFY: &str = "INSTANA_TLS_SKIP_VERIFY";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

// ── Provider config ───────────────────────────────────────────

/// Connection settings for the Instana REST API.
///
/// Only the transport and the CLI read this; the mapping core takes no
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_token: Option<String>,
    /// Tenant host, with or without scheme, e.g. `tenant-unit.instana.io`.
    pub endpoint: Option<String>,
    pub tls_skip_verify: bool,
}

impl ProviderConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            api_token: env_opt(ENV_API_TOKEN),
            endpoint: env_opt(ENV_ENDPOINT),
            tls_skip_verify: env_bool(ENV_TLS_SKIP_VERIFY, false),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let mut missing = Vec::new();
        if self.api_token.is_none() {
            missing.push(ENV_API_TOKEN);
        }
        if self.endpoint.is_none() {
            missing.push(ENV_ENDPOINT);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )))
        }
    }

    /// Endpoint normalized to `scheme://host` without trailing slashes.
    pub fn base_url(&self) -> Result<String, CoreError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| CoreError::Config(format!("{ENV_ENDPOINT} is not set")))?;
        let endpoint = endpoint.trim_end_matches('/');
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            Ok(endpoint.to_string())
        } else {
            Ok(format!("https://{endpoint}"))
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        let api_token = if self.api_token.is_some() { "***" } else { "(none)" };
        tracing::info!(
            endpoint = self.endpoint.as_deref().unwrap_or("(none)"),
            api_token,
            tls_skip_verify = self.tls_skip_verify,
            "Instana provider config loaded"
        );
    }

    /// Return a redacted view safe for printing (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "endpoint": self.endpoint,
            "api_token": self.api_token.as_ref().map(|_| "***"),
            "tls_skip_verify": self.tls_skip_verify,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: Option<&str>, token: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            api_token: token.map(String::from),
            endpoint: endpoint.map(String::from),
            tls_skip_verify: false,
        }
    }

    #[test]
    fn base_url_adds_scheme_and_strips_slash() {
        assert_eq!(
            config(Some("tenant.instana.io/"), None).base_url().unwrap(),
            "https://tenant.instana.io"
        );
        assert_eq!(
            config(Some("http://localhost:8080"), None).base_url().unwrap(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn validate_names_every_missing_setting() {
        let CoreError::Config(msg) = config(None, None).validate().unwrap_err();
        assert!(msg.contains(ENV_API_TOKEN));
        assert!(msg.contains(ENV_ENDPOINT));
        assert!(config(Some("h"), Some("t")).validate().is_ok());
    }

    #[test]
    fn redacted_summary_hides_token() {
        let summary = config(Some("h"), Some("super-secret")).redacted_summary();
        assert_eq!(summary["api_token"], "***");
        assert!(!summary.to_string().contains("super-secret"));
    }
}
