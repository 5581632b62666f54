//! # specify-core
//!
//! Core library for the Specify CLI providing:
//! - Runtime configuration with hierarchical precedence
//! - The assistant and script-flavor catalogue
//! - The step tracker that drives the live progress tree
//! - Cooperative cancellation shared by the provisioning pipeline

pub mod cancel;
pub mod config;
pub mod error;
pub mod tracker;
pub mod types;

pub use cancel::CancelFlag;
pub use config::ConfigLoader;
pub use error::{Error, Result};
pub use tracker::{Step, StepStatus, StepTracker};
