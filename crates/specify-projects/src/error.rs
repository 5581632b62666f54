//! Error types for specify-projects

use thiserror::Error;

/// Result type alias using specify-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project helper error types
#[derive(Error, Debug)]
pub enum Error {
    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Directory to operate on is missing
    #[error("Repository path not found: {path}")]
    RepoNotFound { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create a repository not found error
    pub fn repo_not_found(path: impl Into<String>) -> Self {
        Self::RepoNotFound { path: path.into() }
    }
}
