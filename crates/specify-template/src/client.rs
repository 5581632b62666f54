//! HTTP client handle for template acquisition
//!
//! A [`TemplateClient`] owns the configured `reqwest::Client` together with
//! the GitHub coordinates and the optional bearer token. Every network
//! operation in this crate goes through one, so TLS policy and credentials
//! are decided once per invocation.

use std::time::Duration;

use reqwest::RequestBuilder;
use specify_core::types::RuntimeConfig;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Environment variables consulted for a GitHub token, in precedence order
const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Resolve the GitHub token
///
/// Precedence: explicit value, then `GH_TOKEN`, then `GITHUB_TOKEN`. Values are
/// trimmed and blank values count as absent.
pub fn resolve_token(explicit: Option<&str>) -> Option<String> {
    let candidates = explicit
        .map(str::to_string)
        .into_iter()
        .chain(TOKEN_ENV_VARS.iter().filter_map(|var| std::env::var(var).ok()));

    for candidate in candidates {
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    None
}

/// Network handle used by the resolver and the transfer
#[derive(Debug, Clone)]
pub struct TemplateClient {
    http: reqwest::Client,
    token: Option<String>,
    release_url: String,
    api_timeout: Duration,
    download_timeout: Duration,
}

impl TemplateClient {
    /// Build a client from runtime configuration
    ///
    /// `skip_tls` disables certificate validation entirely. It exists for
    /// broken corporate proxies and is insecure.
    pub fn new(config: &RuntimeConfig, skip_tls: bool, token: Option<String>) -> Result<Self> {
        if skip_tls {
            warn!("TLS certificate verification is disabled");
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.network.user_agent)
            .danger_accept_invalid_certs(skip_tls)
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Template client ready (auth: {})",
            if token.is_some() { "token" } else { "anonymous" }
        );

        Ok(Self {
            http,
            token,
            release_url: config.github.latest_release_url(),
            api_timeout: Duration::from_secs(config.network.http_timeout_secs),
            download_timeout: Duration::from_secs(config.network.download_timeout_secs),
        })
    }

    /// Whether requests carry a bearer token
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// URL of the latest release document
    pub fn release_url(&self) -> &str {
        &self.release_url
    }

    pub(crate) fn api_get(&self, url: &str) -> RequestBuilder {
        let request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .timeout(self.api_timeout);
        self.authorize(request)
    }

    pub(crate) fn download_get(&self, url: &str) -> RequestBuilder {
        let request = self.http.get(url).timeout(self.download_timeout);
        self.authorize(request)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in TOKEN_ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_explicit_token_wins() {
        clear_env();
        std::env::set_var("GH_TOKEN", "from-gh");
        assert_eq!(resolve_token(Some("  explicit ")), Some("explicit".into()));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_gh_token_before_github_token() {
        clear_env();
        std::env::set_var("GH_TOKEN", "from-gh");
        std::env::set_var("GITHUB_TOKEN", "from-github");
        assert_eq!(resolve_token(None), Some("from-gh".into()));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_values_are_absent() {
        clear_env();
        std::env::set_var("GH_TOKEN", "   ");
        std::env::set_var("GITHUB_TOKEN", "fallback");
        assert_eq!(resolve_token(Some("")), Some("fallback".into()));

        std::env::set_var("GITHUB_TOKEN", "\t");
        assert_eq!(resolve_token(None), None);
        clear_env();
    }

    #[test]
    fn test_client_uses_configured_release_url() {
        let mut config = RuntimeConfig::default();
        config.github.api_url = "http://127.0.0.1:9/".into();
        let client = TemplateClient::new(&config, false, None).unwrap();
        assert_eq!(
            client.release_url(),
            "http://127.0.0.1:9/repos/mosugi/spec-kit-ja/releases/latest"
        );
        assert!(!client.is_authenticated());
    }
}
