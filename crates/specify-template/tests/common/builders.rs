//! Builder for release documents served by the mock index

use serde_json::{json, Value};

/// Builder for a latest-release JSON document
#[derive(Debug, Clone)]
pub struct ReleaseBuilder {
    tag_name: String,
    assets: Vec<Value>,
}

impl ReleaseBuilder {
    pub fn new() -> Self {
        Self {
            tag_name: "v1.0.0".to_string(),
            assets: Vec::new(),
        }
    }

    /// Set the tag name
    pub fn tag(mut self, tag: &str) -> Self {
        self.tag_name = tag.to_string();
        self
    }

    /// Add an asset with an explicit URL
    pub fn asset(mut self, name: &str, url: &str, size: u64) -> Self {
        self.assets.push(json!({
            "name": name,
            "browser_download_url": url,
            "size": size,
        }));
        self
    }

    /// Add an asset served by the mock server under `/download/{name}`
    pub fn served_asset(self, server_uri: &str, name: &str, size: u64) -> Self {
        let url = format!("{}/download/{}", server_uri, name);
        self.asset(name, &url, size)
    }

    pub fn build(self) -> Value {
        json!({
            "tag_name": self.tag_name,
            "name": self.tag_name,
            "draft": false,
            "prerelease": false,
            "assets": self.assets,
        })
    }
}

impl Default for ReleaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
