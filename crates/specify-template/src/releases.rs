//! GitHub release lookup and asset selection

use serde::Deserialize;
use tracing::{debug, info};

use crate::client::TemplateClient;
use crate::error::{truncate, Error, Result};

/// Body excerpt length for non-success responses
const STATUS_BODY_LIMIT: usize = 500;

/// Body excerpt length for unparseable responses
const PARSE_BODY_LIMIT: usize = 400;

/// Latest release document (only the fields the resolver needs)
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v0.0.57")
    pub tag_name: String,

    /// Release assets, in the order the index lists them
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Release asset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    /// Asset name
    pub name: String,

    /// Download URL
    pub browser_download_url: String,

    /// Asset size in bytes
    #[serde(default)]
    pub size: u64,
}

/// Asset name fragment for an assistant and script flavor
pub fn asset_pattern(assistant: &str, script: &str) -> String {
    format!("template-{}-{}", assistant, script)
}

impl Release {
    /// Pick the first asset whose name contains `pattern` and ends with `extension`
    pub fn select_asset(&self, pattern: &str, extension: &str) -> Result<&ReleaseAsset> {
        self.assets
            .iter()
            .find(|a| a.name.contains(pattern) && a.name.ends_with(extension))
            .ok_or_else(|| {
                Error::resolution(
                    pattern,
                    self.assets.iter().map(|a| a.name.clone()).collect(),
                )
            })
    }
}

impl TemplateClient {
    /// Fetch the latest release document
    pub async fn fetch_latest_release(&self) -> Result<Release> {
        let url = self.release_url();
        debug!("Fetching latest release from: {}", url);

        let response = self
            .api_get(url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Failed to fetch release information: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let headers = response
                .headers()
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v.to_str().unwrap_or("<binary>")))
                .collect::<Vec<_>>()
                .join("\n");
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport_with_response(
                format!("GitHub API returned {} for {}", status.as_u16(), url),
                Some(status.as_u16()),
                format!(
                    "Headers:\n{}\n\nBody:\n{}",
                    headers,
                    truncate(&body, STATUS_BODY_LIMIT)
                ),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read release response: {}", e)))?;

        let release: Release = serde_json::from_str(&body).map_err(|e| {
            Error::transport_with_response(
                format!("Failed to parse release JSON: {}", e),
                Some(status.as_u16()),
                format!("Raw body:\n{}", truncate(&body, PARSE_BODY_LIMIT)),
            )
        })?;

        info!(
            "Latest release {} lists {} assets",
            release.tag_name,
            release.assets.len()
        );
        Ok(release)
    }

    /// Fetch the latest release and select the asset for the given pattern
    pub async fn resolve_asset(
        &self,
        pattern: &str,
        extension: &str,
    ) -> Result<(Release, ReleaseAsset)> {
        let release = self.fetch_latest_release().await?;
        let asset = release.select_asset(pattern, extension)?.clone();
        debug!("Selected asset {} ({} bytes)", asset.name, asset.size);
        Ok((release, asset))
    }
}
