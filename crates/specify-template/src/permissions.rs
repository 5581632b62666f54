//! Execute-bit restoration for template shell scripts
//!
//! Zip extraction does not carry POSIX modes over, so scripts arrive without
//! execute permission. Every `*.sh` file below the scripts directory that
//! starts with a `#!` line and has no execute bit at all gets execute bits
//! mirroring its read bits, with owner-execute as a floor. Files that already
//! carry any execute bit are left alone, which makes the pass idempotent.

use std::path::{Path, PathBuf};

use tracing::debug;

/// A script whose mode could not be updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a fixup pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixupReport {
    /// Scripts whose mode was changed
    pub updated: usize,
    /// Scripts that could not be inspected or changed
    pub failures: Vec<PermissionFailure>,
}

impl FixupReport {
    /// Whether every candidate was handled
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Short summary, e.g. `3 updated` or `3 updated, 1 failed`
    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            format!("{} updated", self.updated)
        } else {
            format!("{} updated, {} failed", self.updated, self.failures.len())
        }
    }
}

/// Compute the mode after adding execute bits, or `None` if nothing changes
///
/// Read bits are mirrored onto execute bits and owner-execute is always set.
/// Modes that already carry any execute bit are returned unchanged as `None`.
pub fn executable_mode(mode: u32) -> Option<u32> {
    if mode & 0o111 != 0 {
        return None;
    }
    let mut new_mode = mode;
    if mode & 0o400 != 0 {
        new_mode |= 0o100;
    }
    if mode & 0o040 != 0 {
        new_mode |= 0o010;
    }
    if mode & 0o004 != 0 {
        new_mode |= 0o001;
    }
    Some(new_mode | 0o100)
}

/// Restore execute bits on shell scripts below `project/scripts_dir`
///
/// A missing scripts directory is not an error. On platforms without POSIX
/// permission bits this does nothing.
#[cfg(unix)]
pub fn ensure_executable_scripts(project: &Path, scripts_dir: &str) -> FixupReport {
    use std::fs;
    use std::io::Read;
    use std::os::unix::fs::PermissionsExt;
    use walkdir::WalkDir;

    let mut report = FixupReport::default();
    let root = project.join(scripts_dir);
    if !root.is_dir() {
        debug!("No scripts directory at {}", root.display());
        return report;
    }

    for entry in WalkDir::new(&root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.failures.push(PermissionFailure {
                    path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                    message: e.to_string(),
                });
                continue;
            }
        };

        // Symlinks and special files are not touched
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("sh") {
            continue;
        }

        let result = (|| -> std::io::Result<bool> {
            let mut magic = [0u8; 2];
            let mut file = fs::File::open(path)?;
            if file.read_exact(&mut magic).is_err() || &magic != b"#!" {
                return Ok(false);
            }
            let mode = fs::metadata(path)?.permissions().mode();
            match executable_mode(mode) {
                Some(new_mode) => {
                    fs::set_permissions(path, fs::Permissions::from_mode(new_mode))?;
                    debug!("chmod {:o} -> {:o} {}", mode & 0o777, new_mode & 0o777, path.display());
                    Ok(true)
                }
                None => Ok(false),
            }
        })();

        match result {
            Ok(true) => report.updated += 1,
            Ok(false) => {}
            Err(e) => report.failures.push(PermissionFailure {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    report
}

/// Restore execute bits on shell scripts below `project/scripts_dir`
///
/// A missing scripts directory is not an error. On platforms without POSIX
/// permission bits this does nothing.
#[cfg(not(unix))]
pub fn ensure_executable_scripts(_project: &Path, _scripts_dir: &str) -> FixupReport {
    debug!("Permission fixups skipped on this platform");
    FixupReport::default()
}
