//! Repository detection and initialization

use crate::error::{Error, Result};
use camino::Utf8Path;
use specify_core::types::GitWorkflowConfig;
use tokio::process::Command;
use tracing::{debug, info};

/// Whether `path` is inside a git work tree
///
/// Missing directories, a missing `git` executable, and any command failure
/// all count as "no".
pub async fn is_git_repo(path: &Utf8Path) -> bool {
    if !path.is_dir() {
        return false;
    }

    let output = Command::new("git")
        .current_dir(path)
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim() == "true"
        }
        Ok(_) => false,
        Err(e) => {
            debug!("git rev-parse could not run: {}", e);
            false
        }
    }
}

/// Initialize a git repository and commit everything in it
///
/// Runs `git init`, `git add .` and `git commit` in `path`. The commit
/// message comes from the workflow configuration.
///
/// # Errors
/// Returns error if:
/// - Directory doesn't exist
/// - Git is not installed
/// - Any of the git commands fails
pub async fn init_repository(path: &Utf8Path, git_config: &GitWorkflowConfig) -> Result<()> {
    info!("Initializing git repository at: {}", path);

    check_git_available().await?;

    if !path.is_dir() {
        return Err(Error::repo_not_found(path.as_str()));
    }

    run_git(path, &["init"], "git init").await?;
    run_git(path, &["add", "."], "git add").await?;
    run_git(
        path,
        &["commit", "-m", &git_config.initial_commit_message],
        "git commit",
    )
    .await?;

    info!("Repository initialized with initial commit");
    Ok(())
}

/// Check if git is available in PATH
pub async fn check_git_available() -> Result<()> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|_| Error::GitNotFound)?;

    if !output.status.success() {
        return Err(Error::GitNotFound);
    }

    Ok(())
}

async fn run_git(path: &Utf8Path, args: &[&str], what: &str) -> Result<()> {
    debug!("Running: git {}", args.join(" "));
    let output = Command::new("git")
        .current_dir(path)
        .args(args)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_operation(format!(
            "{} failed: {}",
            what,
            stderr.trim()
        )));
    }
    Ok(())
}
