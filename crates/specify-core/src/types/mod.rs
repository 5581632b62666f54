//! Type definitions shared across the Specify crates

mod assistant;
mod runtime_config;

pub use assistant::{Assistant, ScriptType, ASSISTANTS};
pub use runtime_config::{
    GitHubConfig, GitWorkflowConfig, NetworkConfig, RuntimeConfig, TemplateConfig,
};
