//! # specify-projects
//!
//! Project helpers for the Specify CLI:
//! - Git operations (detect an enclosing work tree, initialize with one commit)
//! - Tool discovery ("is executable X installed")
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use specify_core::types::GitWorkflowConfig;
//! use specify_projects::git::{init_repository, is_git_repo};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Utf8Path::new("/tmp/my-project");
//! if !is_git_repo(path).await {
//!     init_repository(path, &GitWorkflowConfig::default()).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod git;
pub mod tools;

pub use error::{Error, Result};
