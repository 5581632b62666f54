//! Template acquisition for the Specify CLI
//!
//! This crate turns an (assistant, script flavor) pair into a populated
//! project directory:
//! - [`TemplateClient`]: HTTP handle carrying TLS policy and credentials
//! - [`releases`]: latest-release lookup and asset selection
//! - [`download`]: streaming archive transfer with progress
//! - [`extract`]: fresh/merge materialization with single-root flattening
//! - [`permissions`]: execute-bit restoration for shell scripts
//! - [`pipeline`]: the whole sequence, reporting through a step tracker

pub mod client;
pub mod download;
pub mod error;
pub mod extract;
pub mod permissions;
pub mod pipeline;
pub mod releases;

pub use client::{resolve_token, TemplateClient};
pub use download::TransferResult;
pub use error::{Error, Result};
pub use extract::{materialize, MaterializeReport, TargetLayout};
pub use permissions::{ensure_executable_scripts, FixupReport, PermissionFailure};
pub use pipeline::{provision, ProvisionOutcome, ProvisionRequest};
pub use releases::{asset_pattern, Release, ReleaseAsset};
