//! End-to-end template provisioning
//!
//! Runs resolve, download, materialize, archive cleanup and permission
//! fixups in order on the caller's task, reporting each stage through the
//! tracker under the keys `fetch`, `download`, `extract`, `cleanup` and
//! `chmod`. The downloaded archive lives in a private temporary directory
//! and is deleted on every exit path.

use std::fs;
use std::path::PathBuf;

use specify_core::types::{ScriptType, TemplateConfig};
use specify_core::{CancelFlag, StepTracker};
use tracing::{debug, info};

use crate::client::TemplateClient;
use crate::error::{Error, Result};
use crate::extract::{materialize, occupied, MaterializeReport, TargetLayout};
use crate::permissions::{ensure_executable_scripts, FixupReport};
use crate::releases::{asset_pattern, ReleaseAsset};

/// Byte interval between detail updates when the total size is unknown
const UNKNOWN_SIZE_STEP: u64 = 256 * 1024;

/// What to provision and where
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    /// Assistant key used in the asset name
    pub assistant: String,
    /// Script flavor used in the asset name
    pub script: ScriptType,
    /// Project directory
    pub target: PathBuf,
    /// Whether the project directory is created or merged into
    pub layout: TargetLayout,
    /// Required asset name suffix
    pub archive_extension: String,
    /// Scripts directory, relative to the project
    pub scripts_dir: String,
}

impl ProvisionRequest {
    /// Build a request using the template settings from configuration
    pub fn new(
        assistant: impl Into<String>,
        script: ScriptType,
        target: impl Into<PathBuf>,
        layout: TargetLayout,
        template: &TemplateConfig,
    ) -> Self {
        Self {
            assistant: assistant.into(),
            script,
            target: target.into(),
            layout,
            archive_extension: template.archive_extension.clone(),
            scripts_dir: template.scripts_dir.clone(),
        }
    }

    /// Asset name fragment for this request
    pub fn pattern(&self) -> String {
        asset_pattern(&self.assistant, self.script.key())
    }
}

/// Result of a successful provisioning run
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    pub release_tag: String,
    pub asset: ReleaseAsset,
    pub materialized: MaterializeReport,
    pub fixups: FixupReport,
}

/// Provision a project directory from the latest template release
///
/// Fatal errors mark the failing step and are returned. Fixup failures are
/// not fatal; they are reported on the `chmod` step and in the outcome.
pub async fn provision(
    client: &TemplateClient,
    request: &ProvisionRequest,
    tracker: &mut StepTracker,
    cancel: &CancelFlag,
) -> Result<ProvisionOutcome> {
    if request.layout == TargetLayout::Fresh && occupied(&request.target) {
        return Err(Error::target_exists(request.target.display().to_string()));
    }

    // Resolve
    tracker.start("fetch", "contacting GitHub API");
    let pattern = request.pattern();
    let (release, asset) = match client
        .resolve_asset(&pattern, &request.archive_extension)
        .await
    {
        Ok(found) => found,
        Err(e) => {
            tracker.error("fetch", &e.to_string());
            return Err(e);
        }
    };
    tracker.complete(
        "fetch",
        &format!("release {} ({} bytes)", release.tag_name, asset.size),
    );
    check_cancelled(cancel)?;

    // Download
    let download_dir = tempfile::Builder::new()
        .prefix("specify-download-")
        .tempdir()?;
    tracker.start("download", &asset.name);
    let mut progress = ProgressDetail::default();
    let transfer = client
        .download_asset(
            &asset,
            &release.tag_name,
            download_dir.path(),
            cancel,
            |downloaded, total| {
                if let Some(detail) = progress.update(downloaded, total) {
                    tracker.start("download", &detail);
                }
            },
        )
        .await;
    let transfer = match transfer {
        Ok(transfer) => transfer,
        Err(e) => {
            tracker.error("download", &e.to_string());
            return Err(e);
        }
    };
    tracker.complete("download", &transfer.filename);
    debug!(
        "Fetched {} bytes from {}",
        transfer.size_bytes, transfer.source_url
    );

    // Extract; the archive is removed whatever the outcome
    tracker.start("extract", "");
    let extracted = check_cancelled(cancel).and_then(|_| {
        materialize(
            &transfer.local_path,
            &request.target,
            request.layout,
            tracker,
            cancel,
        )
    });

    tracker.start("cleanup", "");
    match fs::remove_file(&transfer.local_path) {
        Ok(()) => tracker.complete("cleanup", ""),
        Err(e) => {
            debug!("Failed to remove {}: {}", transfer.local_path.display(), e);
            tracker.error("cleanup", &e.to_string());
        }
    }
    if let Err(e) = download_dir.close() {
        debug!("Failed to remove download directory: {}", e);
    }

    let materialized = match extracted {
        Ok(report) => report,
        Err(e) => {
            tracker.error("extract", &e.to_string());
            return Err(e);
        }
    };
    tracker.complete(
        "extract",
        &format!("{} top-level items", materialized.top_level_items),
    );

    // Fixups
    tracker.start("chmod", "");
    let fixups = ensure_executable_scripts(&request.target, &request.scripts_dir);
    for failure in &fixups.failures {
        debug!(
            "Could not make {} executable: {}",
            failure.path.display(),
            failure.message
        );
    }
    if fixups.is_clean() {
        tracker.complete("chmod", &fixups.summary());
    } else {
        tracker.error("chmod", &fixups.summary());
    }

    info!(
        "Provisioned {} from {} ({})",
        request.target.display(),
        asset.name,
        release.tag_name
    );

    Ok(ProvisionOutcome {
        release_tag: release.tag_name,
        asset,
        materialized,
        fixups,
    })
}

/// Download step detail, produced only when it changes
///
/// Known totals give a percentage; unknown totals give a byte count that
/// advances every [`UNKNOWN_SIZE_STEP`] bytes.
#[derive(Debug, Default)]
struct ProgressDetail {
    last: Option<u64>,
}

impl ProgressDetail {
    fn update(&mut self, downloaded: u64, total: Option<u64>) -> Option<String> {
        let marker = match total {
            Some(total) => (downloaded.saturating_mul(100) / total).min(100),
            None => downloaded / UNKNOWN_SIZE_STEP,
        };
        if self.last == Some(marker) {
            return None;
        }
        self.last = Some(marker);
        Some(match total {
            Some(_) => format!("{}%", marker),
            None => format!("{} bytes", downloaded),
        })
    }
}

fn check_cancelled(cancel: &CancelFlag) -> Result<()> {
    if cancel.is_cancelled() {
        Err(Error::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_detail_known_total() {
        let mut progress = ProgressDetail::default();
        assert_eq!(progress.update(0, Some(200)).as_deref(), Some("0%"));
        assert_eq!(progress.update(1, Some(200)), None);
        assert_eq!(progress.update(100, Some(200)).as_deref(), Some("50%"));
        assert_eq!(progress.update(200, Some(200)).as_deref(), Some("100%"));
    }

    #[test]
    fn test_progress_detail_unknown_total() {
        let mut progress = ProgressDetail::default();
        assert_eq!(progress.update(0, None).as_deref(), Some("0 bytes"));
        assert_eq!(progress.update(UNKNOWN_SIZE_STEP - 1, None), None);
        assert_eq!(
            progress.update(UNKNOWN_SIZE_STEP + 10, None),
            Some(format!("{} bytes", UNKNOWN_SIZE_STEP + 10))
        );
        assert_eq!(progress.update(UNKNOWN_SIZE_STEP + 20, None), None);
    }
}
