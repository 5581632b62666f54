//! Error types for specify-template

use thiserror::Error;

/// Result type alias using specify-template's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Template acquisition error types
#[derive(Error, Debug)]
pub enum Error {
    /// No release asset matched the expected naming pattern
    #[error("No matching release asset found for '{pattern}'")]
    Resolution {
        pattern: String,
        available: Vec<String>,
    },

    /// HTTP request failed, returned a bad status, or returned an unreadable body
    #[error("{message}")]
    Transport {
        message: String,
        status: Option<u16>,
        details: Option<String>,
    },

    /// Archive could not be read or unpacked
    #[error("Failed to extract template: {message}")]
    Extraction { message: String },

    /// Fresh target already exists
    #[error("Directory '{path}' already exists")]
    TargetExists { path: String },

    /// Interrupted by the user
    #[error("Operation cancelled")]
    Cancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a resolution error
    pub fn resolution(pattern: impl Into<String>, available: Vec<String>) -> Self {
        Self::Resolution {
            pattern: pattern.into(),
            available,
        }
    }

    /// Create a transport error without a response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
            details: None,
        }
    }

    /// Create a transport error carrying response diagnostics
    pub fn transport_with_response(
        message: impl Into<String>,
        status: Option<u16>,
        details: impl Into<String>,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            status,
            details: Some(details.into()),
        }
    }

    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Create a target exists error
    pub fn target_exists(path: impl Into<String>) -> Self {
        Self::TargetExists { path: path.into() }
    }

    /// HTTP status attached to a transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Extended diagnostic text, shown only in debug output
    pub fn diagnostics(&self) -> Option<String> {
        match self {
            Self::Resolution { pattern, available } => {
                let listing = if available.is_empty() {
                    "(no assets)".to_string()
                } else {
                    available
                        .iter()
                        .map(|name| format!("  - {}", name))
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                Some(format!(
                    "Pattern: {}\nAvailable assets:\n{}",
                    pattern, listing
                ))
            }
            Self::Transport { details, .. } => details.clone(),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Self::extraction(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
            details: None,
        }
    }
}

/// Truncate text to at most `max` characters for diagnostic output
pub(crate) fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_diagnostics_lists_assets() {
        let err = Error::resolution(
            "template-claude-sh",
            vec!["template-gemini-sh.zip".into(), "notes.txt".into()],
        );
        let diag = err.diagnostics().unwrap();
        assert!(diag.contains("template-claude-sh"));
        assert!(diag.contains("  - template-gemini-sh.zip"));
        assert!(diag.contains("  - notes.txt"));
    }

    #[test]
    fn test_resolution_diagnostics_no_assets() {
        let err = Error::resolution("template-claude-sh", vec![]);
        assert!(err.diagnostics().unwrap().contains("(no assets)"));
    }

    #[test]
    fn test_transport_status() {
        let err = Error::transport_with_response("GitHub API returned 404", Some(404), "body");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.diagnostics().as_deref(), Some("body"));
        assert_eq!(err.to_string(), "GitHub API returned 404");
    }

    #[test]
    fn test_zip_io_error_is_extraction() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "Invalid checksum");
        let err = Error::from(zip::result::ZipError::Io(io));
        assert!(matches!(err, Error::Extraction { .. }));
        assert!(err.to_string().contains("Invalid checksum"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ああああ", 2), "ああ...");
    }
}
