//! Git helper tests
//!
//! These run the real `git` binary and return early when it is missing.

use camino::Utf8PathBuf;
use serial_test::serial;
use specify_core::types::GitWorkflowConfig;
use specify_projects::git::{check_git_available, init_repository, is_git_repo};
use specify_projects::Error;
use tempfile::TempDir;
use tokio::process::Command;

fn utf8(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
}

async fn git_missing() -> bool {
    check_git_available().await.is_err()
}

fn set_identity() {
    std::env::set_var("GIT_AUTHOR_NAME", "Specify Test");
    std::env::set_var("GIT_AUTHOR_EMAIL", "test@example.com");
    std::env::set_var("GIT_COMMITTER_NAME", "Specify Test");
    std::env::set_var("GIT_COMMITTER_EMAIL", "test@example.com");
}

#[tokio::test]
async fn test_plain_directory_is_not_repo() {
    if git_missing().await {
        return;
    }
    let temp = TempDir::new().unwrap();
    // A tempdir could sit inside someone's work tree; only assert when it does not
    let parent_is_repo = is_git_repo(&utf8(&temp).join("..")).await;
    if !parent_is_repo {
        assert!(!is_git_repo(&utf8(&temp)).await);
    }
}

#[tokio::test]
async fn test_missing_directory_is_not_repo() {
    let temp = TempDir::new().unwrap();
    assert!(!is_git_repo(&utf8(&temp).join("nope")).await);
}

#[tokio::test]
#[serial]
async fn test_init_creates_single_commit() {
    if git_missing().await {
        return;
    }
    set_identity();

    let temp = TempDir::new().unwrap();
    let path = utf8(&temp);
    std::fs::write(path.join("README.md"), "hello").unwrap();

    let config = GitWorkflowConfig {
        initial_commit_message: "Initial commit from test".to_string(),
    };
    init_repository(&path, &config).await.unwrap();

    assert!(path.join(".git").is_dir());
    assert!(is_git_repo(&path).await);

    let log = Command::new("git")
        .current_dir(&path)
        .args(["log", "--format=%s"])
        .output()
        .await
        .unwrap();
    let subjects = String::from_utf8_lossy(&log.stdout);
    assert_eq!(subjects.trim(), "Initial commit from test");

    let status = Command::new("git")
        .current_dir(&path)
        .args(["status", "--porcelain"])
        .output()
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&status.stdout).trim().is_empty());
}

#[tokio::test]
#[serial]
async fn test_init_missing_directory() {
    if git_missing().await {
        return;
    }
    let temp = TempDir::new().unwrap();
    let err = init_repository(&utf8(&temp).join("missing"), &GitWorkflowConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RepoNotFound { .. }));
}
