//! Mock server helpers for release and download testing

use serde_json::Value;
use specify_core::types::RuntimeConfig;
use specify_template::TemplateClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the latest-release document for the default repository
pub const RELEASE_PATH: &str = "/repos/mosugi/spec-kit-ja/releases/latest";

/// Serve `body` as the latest release
pub async fn mock_latest_release(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(RELEASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer the latest-release request with a fixed status and raw body
pub async fn mock_release_status(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(RELEASE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Serve `content` at `/download/{name}`
pub async fn mock_asset_download(server: &MockServer, name: &str, content: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}

/// Fail `/download/{name}` with the given status
pub async fn mock_failing_download(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{}", name)))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(server)
        .await;
}

/// Runtime configuration pointing the GitHub API at the mock server
pub fn test_config(server: &MockServer) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    config.github.api_url = server.uri();
    config.network.http_timeout_secs = 5;
    config.network.download_timeout_secs = 5;
    config
}

/// Anonymous client for the mock server
pub fn test_client(server: &MockServer) -> TemplateClient {
    TemplateClient::new(&test_config(server), false, None).unwrap()
}
