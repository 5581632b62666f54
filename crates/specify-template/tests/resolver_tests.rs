//! Release resolution against a mock GitHub API
//!
//! Tests cover:
//! - Pattern-based asset selection, first match wins
//! - Resolution errors listing available assets
//! - Transport errors for bad status and unparseable bodies
//! - Bearer token forwarding, and no credentials when anonymous

mod common;

use common::*;
use specify_core::types::RuntimeConfig;
use specify_template::{Error, TemplateClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_resolve_first_matching_asset() {
    let server = MockServer::start().await;
    let release = ReleaseBuilder::new()
        .tag("v0.0.57")
        .served_asset(&server.uri(), "spec-kit-template-gemini-sh-v0.0.57.zip", 10)
        .served_asset(&server.uri(), "spec-kit-template-claude-sh-v0.0.57.zip", 20)
        .served_asset(&server.uri(), "spec-kit-template-claude-sh-v0.0.57-extra.zip", 30)
        .build();
    mock_latest_release(&server, release).await;

    let client = test_client(&server);
    let (release, asset) = client
        .resolve_asset("template-claude-sh", ".zip")
        .await
        .unwrap();

    assert_eq!(release.tag_name, "v0.0.57");
    assert_eq!(asset.name, "spec-kit-template-claude-sh-v0.0.57.zip");
    assert_eq!(asset.size, 20);
}

#[tokio::test]
async fn test_no_matching_asset() {
    let server = MockServer::start().await;
    let release = ReleaseBuilder::new()
        .served_asset(&server.uri(), "spec-kit-template-gemini-ps-v1.zip", 10)
        .build();
    mock_latest_release(&server, release).await;

    let err = test_client(&server)
        .resolve_asset("template-claude-sh", ".zip")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Resolution { .. }));
    let diag = err.diagnostics().unwrap();
    assert!(diag.contains("template-claude-sh"));
    assert!(diag.contains("spec-kit-template-gemini-ps-v1.zip"));

    // Nothing was downloaded
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_release_without_assets() {
    let server = MockServer::start().await;
    mock_latest_release(&server, ReleaseBuilder::new().build()).await;

    let err = test_client(&server)
        .resolve_asset("template-claude-sh", ".zip")
        .await
        .unwrap_err();

    assert!(err.diagnostics().unwrap().contains("(no assets)"));
}

#[tokio::test]
async fn test_not_found_is_transport_error() {
    let server = MockServer::start().await;
    mock_release_status(&server, 404, r#"{"message":"Not Found"}"#).await;

    let err = test_client(&server).fetch_latest_release().await.unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("404"));
    assert!(err.diagnostics().unwrap().contains("Not Found"));
}

#[tokio::test]
async fn test_error_body_is_truncated() {
    let server = MockServer::start().await;
    let body = "x".repeat(2000);
    mock_release_status(&server, 500, &body).await;

    let err = test_client(&server).fetch_latest_release().await.unwrap_err();
    let diag = err.diagnostics().unwrap();

    assert!(diag.contains(&"x".repeat(500)));
    assert!(!diag.contains(&"x".repeat(501)));
}

#[tokio::test]
async fn test_unparseable_body_is_transport_error() {
    let server = MockServer::start().await;
    mock_release_status(&server, 200, "<html>rate limited</html>").await;

    let err = test_client(&server).fetch_latest_release().await.unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert!(err.to_string().contains("parse"));
    assert!(err.diagnostics().unwrap().contains("rate limited"));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RELEASE_PATH))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ReleaseBuilder::new().build()))
        .mount(&server)
        .await;

    let client =
        TemplateClient::new(&test_config(&server), false, Some("secret-token".into())).unwrap();
    let release = client.fetch_latest_release().await.unwrap();

    assert_eq!(release.tag_name, "v1.0.0");
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_anonymous_client_sends_no_authorization() {
    let server = MockServer::start().await;
    mock_latest_release(&server, ReleaseBuilder::new().build()).await;

    let client = test_client(&server);
    client.fetch_latest_release().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_custom_repository_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/templates/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ReleaseBuilder::new().tag("v9").build()))
        .mount(&server)
        .await;

    let mut config: RuntimeConfig = test_config(&server);
    config.github.repo_owner = "acme".into();
    config.github.repo_name = "templates".into();
    let client = TemplateClient::new(&config, false, None).unwrap();

    assert_eq!(client.fetch_latest_release().await.unwrap().tag_name, "v9");
}
