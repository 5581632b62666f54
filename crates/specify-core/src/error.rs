//! Error types for specify-core

use thiserror::Error;

/// Result type alias using specify-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Specify
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown assistant identifier
    #[error("Invalid AI assistant '{assistant}'. Choose from: {available}")]
    UnknownAssistant {
        assistant: String,
        available: String,
    },

    /// Unknown script flavor
    #[error("Invalid script type '{script}'. Choose from: {available}")]
    UnknownScriptType { script: String, available: String },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unknown assistant error
    pub fn unknown_assistant(assistant: impl Into<String>, available: impl Into<String>) -> Self {
        Self::UnknownAssistant {
            assistant: assistant.into(),
            available: available.into(),
        }
    }

    /// Create an unknown script type error
    pub fn unknown_script_type(script: impl Into<String>, available: impl Into<String>) -> Self {
        Self::UnknownScriptType {
            script: script.into(),
            available: available.into(),
        }
    }
}
