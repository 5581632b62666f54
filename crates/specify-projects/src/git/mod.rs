//! Git operations module
//!
//! Async wrappers around the `git` executable:
//! - Detecting whether a directory already lives inside a work tree
//! - Initializing a repository with a single commit of everything present

mod init;

pub use init::{check_git_available, init_repository, is_git_repo};
