//! Archive materialization
//!
//! Unpacks a template archive into the project directory. Two layouts are
//! supported:
//!
//! - **Fresh**: the target is created by this operation, or is an existing
//!   empty directory. Entries are written straight into it. Any failure
//!   removes a created target again and empties a pre-existing one.
//! - **Merge**: the target already exists and may hold user files. Entries
//!   are unpacked into a private staging directory first and then copied in,
//!   overwriting files that already exist (last write wins, no backup).
//!   Pre-existing files that the archive does not mention are never touched.
//!
//! In both layouts an archive whose only top-level entry is a directory is
//! flattened: that directory's contents become the payload.
//!
//! Progress sub-steps (`zip-list`, `extracted-summary`, `flatten`) are
//! reported to the tracker as they are discovered. Filesystem and
//! decompression failures are reported as extraction errors naming the path
//! involved.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use specify_core::{CancelFlag, StepTracker};
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// How the target directory relates to this operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLayout {
    /// Target is created here; it may only pre-exist as an empty directory
    Fresh,
    /// Target already exists and its contents are preserved
    Merge,
}

/// What materialization did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Entries listed in the archive
    pub entries: usize,
    /// Top-level items produced by unpacking, before flattening
    pub extracted_items: usize,
    /// Whether a single wrapping directory was collapsed
    pub flattened: bool,
    /// Top-level payload items placed in the target
    pub top_level_items: usize,
}

/// Unpack `archive_path` into `target` using the given layout
///
/// The archive file itself is left in place; deleting it is the caller's job.
pub fn materialize(
    archive_path: &Path,
    target: &Path,
    layout: TargetLayout,
    tracker: &mut StepTracker,
    cancel: &CancelFlag,
) -> Result<MaterializeReport> {
    info!(
        "Materializing {} into {} ({:?})",
        archive_path.display(),
        target.display(),
        layout
    );
    match layout {
        TargetLayout::Fresh => materialize_fresh(archive_path, target, tracker, cancel),
        TargetLayout::Merge => materialize_merge(archive_path, target, tracker, cancel),
    }
}

fn materialize_fresh(
    archive_path: &Path,
    target: &Path,
    tracker: &mut StepTracker,
    cancel: &CancelFlag,
) -> Result<MaterializeReport> {
    if occupied(target) {
        return Err(Error::target_exists(target.display().to_string()));
    }

    let mut guard = FreshTargetGuard::new(target, !target.exists());
    fs::create_dir_all(target).map_err(fs_error(target))?;

    let mut archive = open_archive(archive_path)?;
    let entries = report_entries(&archive, tracker);
    unpack(&mut archive, target, cancel)?;

    let items = top_level_entries(target)?;
    tracker.start("extracted-summary", "");
    tracker.complete(
        "extracted-summary",
        &format!("{} top-level items", items.len()),
    );

    let flattened = match single_root(&items) {
        Some(root) => {
            tracker.add("flatten", "Flatten nested directory");
            tracker.start("flatten", "");
            replace_with_contents(target, &root)?;
            tracker.complete("flatten", &display_name(&root));
            true
        }
        None => false,
    };

    let top_level_items = top_level_entries(target)?.len();
    guard.disarm();

    Ok(MaterializeReport {
        entries,
        extracted_items: items.len(),
        flattened,
        top_level_items,
    })
}

fn materialize_merge(
    archive_path: &Path,
    target: &Path,
    tracker: &mut StepTracker,
    cancel: &CancelFlag,
) -> Result<MaterializeReport> {
    fs::create_dir_all(target).map_err(fs_error(target))?;

    let staging = tempfile::Builder::new()
        .prefix("specify-extract-")
        .tempdir()
        .map_err(|e| Error::extraction(format!("Failed to create staging directory: {}", e)))?;

    let mut archive = open_archive(archive_path)?;
    let entries = report_entries(&archive, tracker);
    unpack(&mut archive, staging.path(), cancel)?;

    let items = top_level_entries(staging.path())?;
    tracker.start("extracted-summary", "");
    tracker.complete("extracted-summary", &format!("temp {} items", items.len()));

    let (source, flattened) = match single_root(&items) {
        Some(root) => {
            tracker.add("flatten", "Flatten nested directory");
            tracker.start("flatten", "");
            tracker.complete("flatten", &display_name(&root));
            (root, true)
        }
        None => (staging.path().to_path_buf(), false),
    };

    let payload = top_level_entries(&source)?;
    for item in &payload {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let Some(name) = item.file_name() else {
            continue;
        };
        let dest = target.join(name);
        if item.is_dir() {
            merge_tree(item, &dest, cancel)?;
        } else {
            if dest.exists() {
                debug!("Overwriting {}", dest.display());
            }
            fs::copy(item, &dest).map_err(fs_error(&dest))?;
        }
    }

    if let Err(e) = staging.close() {
        debug!("Failed to remove staging directory: {}", e);
    }

    Ok(MaterializeReport {
        entries,
        extracted_items: items.len(),
        flattened,
        top_level_items: payload.len(),
    })
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).map_err(fs_error(path))?;
    ZipArchive::new(file)
        .map_err(|e| Error::extraction(format!("{} is not a valid zip archive: {}", path.display(), e)))
}

fn report_entries(archive: &ZipArchive<File>, tracker: &mut StepTracker) -> usize {
    let entries = archive.len();
    tracker.start("zip-list", "");
    tracker.complete("zip-list", &format!("{} entries", entries));
    entries
}

/// Whether `path` exists as anything other than an empty directory
pub(crate) fn occupied(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => path.exists(),
    }
}

/// Write every archive entry below `dest`
fn unpack(archive: &mut ZipArchive<File>, dest: &Path, cancel: &CancelFlag) -> Result<()> {
    for i in 0..archive.len() {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut entry = archive
            .by_index(i)
            .map_err(|e| Error::extraction(format!("Failed to read archive entry {}: {}", i, e)))?;
        let Some(relative) = entry.enclosed_name() else {
            debug!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(fs_error(&out_path))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(fs_error(parent))?;
        }
        let mut out = File::create(&out_path).map_err(fs_error(&out_path))?;
        // Checksum mismatches surface here as read errors
        io::copy(&mut entry, &mut out).map_err(|e| {
            Error::extraction(format!("{} ({}): {}", entry.name(), out_path.display(), e))
        })?;
    }
    Ok(())
}

fn top_level_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut items = fs::read_dir(dir)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.path()))
                .collect::<io::Result<Vec<_>>>()
        })
        .map_err(fs_error(dir))?;
    items.sort();
    Ok(items)
}

/// The wrapping directory, when `items` is exactly one directory
fn single_root(items: &[PathBuf]) -> Option<PathBuf> {
    match items {
        [only] if only.is_dir() => Some(only.clone()),
        _ => None,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Replace `target` with the contents of `nested`, its only child
///
/// The nested directory is parked in a temporary sibling of `target`, the
/// emptied target is removed, and the parked directory is renamed into its
/// place. Both paths share a parent so the renames stay on one filesystem.
fn replace_with_contents(target: &Path, nested: &Path) -> Result<()> {
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let holder = tempfile::Builder::new()
        .prefix(".specify-flatten-")
        .tempdir_in(parent)
        .map_err(fs_error(parent))?;
    let parked = holder.path().join("payload");

    fs::rename(nested, &parked).map_err(fs_error(nested))?;
    fs::remove_dir(target).map_err(fs_error(target))?;
    fs::rename(&parked, target).map_err(fs_error(target))?;

    debug!("Flattened {} into {}", nested.display(), target.display());
    holder.close().map_err(fs_error(parent))?;
    Ok(())
}

/// Copy `src` into `dest` file by file, creating directories as needed
fn merge_tree(src: &Path, dest: &Path, cancel: &CancelFlag) -> Result<()> {
    fs::create_dir_all(dest).map_err(fs_error(dest))?;

    for entry in WalkDir::new(src).min_depth(1) {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let entry = entry.map_err(|e| Error::extraction(format!("Failed to walk staging: {}", e)))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::extraction(e.to_string()))?;
        let out_path = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&out_path).map_err(fs_error(&out_path))?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(fs_error(parent))?;
            }
            if out_path.exists() {
                debug!("Overwriting {}", out_path.display());
            }
            fs::copy(entry.path(), &out_path).map_err(fs_error(&out_path))?;
        }
    }
    Ok(())
}

/// Map an I/O failure on `path` to an extraction error naming it
fn fs_error(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |e| Error::extraction(format!("{}: {}", path.display(), e))
}

/// Undoes a Fresh materialization unless disarmed
///
/// A target created by this run is removed. A target that already existed
/// as an empty directory is emptied again and kept.
struct FreshTargetGuard {
    path: PathBuf,
    created: bool,
    armed: bool,
}

impl FreshTargetGuard {
    fn new(path: &Path, created: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            created,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for FreshTargetGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        info!("Rolling back {}", self.path.display());
        let result = if self.created {
            if self.path.exists() {
                fs::remove_dir_all(&self.path)
            } else {
                Ok(())
            }
        } else {
            empty_dir(&self.path)
        };
        if let Err(e) = result {
            debug!("Rollback of {} incomplete: {}", self.path.display(), e);
        }
    }
}

/// Remove everything inside `dir`, recreating it if it went missing
fn empty_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        return fs::create_dir_all(dir);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() && !path.is_symlink() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
