//! Runtime configuration types for operational parameters
//!
//! These types define configuration that controls where templates are
//! fetched from, network timeouts, and how the project is finalized.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// GitHub repository that publishes the template releases
    #[serde(default)]
    pub github: GitHubConfig,

    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Template archive settings
    #[serde(default)]
    pub template: TemplateConfig,

    /// Git workflow defaults
    #[serde(default)]
    pub git_workflow: GitWorkflowConfig,
}

/// GitHub repository settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Repository owner
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// Repository name
    #[serde(default = "default_repo_name")]
    pub repo_name: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
        }
    }
}

impl GitHubConfig {
    /// URL of the "latest release" document
    pub fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url.trim_end_matches('/'),
            self.repo_owner,
            self.repo_name
        )
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_repo_owner() -> String {
    "mosugi".to_string()
}
fn default_repo_name() -> String {
    "spec-kit-ja".to_string()
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Timeout for the release index request, in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Timeout for the archive download, in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            download_timeout_secs: default_download_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_download_timeout() -> u64 {
    60
}
fn default_user_agent() -> String {
    format!(
        "specify/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Template archive settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateConfig {
    /// Required suffix of the release asset name
    #[serde(default = "default_archive_extension")]
    pub archive_extension: String,

    /// Directory (relative to the project root) whose shell scripts get execute bits
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            archive_extension: default_archive_extension(),
            scripts_dir: default_scripts_dir(),
        }
    }
}

fn default_archive_extension() -> String {
    ".zip".to_string()
}
fn default_scripts_dir() -> String {
    ".specify/scripts".to_string()
}

/// Git workflow defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitWorkflowConfig {
    /// Message of the single commit created for a fresh repository
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,
}

impl Default for GitWorkflowConfig {
    fn default() -> Self {
        Self {
            initial_commit_message: default_initial_commit_message(),
        }
    }
}

fn default_initial_commit_message() -> String {
    "Initial commit from Specify template".to_string()
}
