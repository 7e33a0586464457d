//! Moving items into the trash.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{io_to_core, rename_error, CoreError, CoreResult};
use crate::trash::manifest::{Manifest, ManifestRecord};
use crate::trash::paths::{base_name, physical_path, resolve_root, trash_dir_for};

/// Source of the epoch seconds embedded in trashed names.
pub trait Clock {
    fn now_epoch(&self) -> u64;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// Result of a successful [`move_to_trash`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashOutcome {
    /// Where the item now lives.
    pub trashed_path: PathBuf,
    /// The line appended to the manifest.
    pub record: ManifestRecord,
}

/// Moves `target` into the trash under `root` (current directory when `None`).
///
/// The item is renamed to `<root>/.trash/<epoch>_<basename>` and a record is
/// appended to the manifest only after the rename succeeded. `target` is
/// resolved through symlinks in its parent directories (see
/// [`physical_path`]); a symlink named last is trashed as a link.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `target` does not exist.
/// - [`CoreError::InvalidTarget`] if `target` is the trash directory, lives
///   inside it, or contains it, or if its path cannot be written to the
///   manifest (not UTF-8, or holds a tab or line break).
/// - [`CoreError::MoveFailed`] / [`CoreError::PermissionDenied`] if the
///   rename fails; nothing is recorded in that case.
/// - [`CoreError::ManifestWrite`] if the item moved but the record could not
///   be appended.
pub fn move_to_trash(target: &Path, root: Option<&Path>) -> CoreResult<TrashOutcome> {
    move_to_trash_at(target, root, &SystemClock)
}

/// [`move_to_trash`] with an explicit clock.
pub fn move_to_trash_at(
    target: &Path,
    root: Option<&Path>,
    clock: &dyn Clock,
) -> CoreResult<TrashOutcome> {
    let original = physical_path(target).map_err(|e| io_to_core(e, target))?;
    // symlink_metadata so a dangling symlink can still be trashed
    fs::symlink_metadata(&original).map_err(|e| io_to_core(e, target))?;

    let root = resolve_root(root);
    let physical_trash = match fs::canonicalize(&root) {
        Ok(physical_root) => trash_dir_for(&physical_root),
        Err(_) => trash_dir_for(&root),
    };
    check_target(&original, &physical_trash)?;
    check_recordable(&original)?;

    let base = base_name(&original).ok_or_else(|| CoreError::InvalidTarget {
        path: original.clone(),
        reason: "path has no file name".to_string(),
    })?;

    let manifest = Manifest::ensure(&root)?;

    let epoch = clock.now_epoch();
    let trashed_name = format!("{epoch}_{base}");
    let trashed_path = manifest.trash_dir().join(&trashed_name);

    if fs::symlink_metadata(&trashed_path).is_ok() {
        tracing::warn!(
            "{} already exists in trash; the move may replace it",
            trashed_path.display()
        );
    }

    fs::rename(&original, &trashed_path).map_err(|e| rename_error(e, &original, &trashed_path))?;

    let record = ManifestRecord::new(epoch, trashed_name, original);
    manifest.append(&record)?;

    tracing::info!(
        "trashed {} -> {}",
        record.original_path().display(),
        trashed_path.display()
    );

    Ok(TrashOutcome {
        trashed_path,
        record,
    })
}

fn check_target(original: &Path, trash_dir: &Path) -> CoreResult<()> {
    let reason = if original.starts_with(trash_dir) {
        "already inside the trash directory"
    } else if trash_dir.starts_with(original) {
        "contains the trash directory"
    } else {
        return Ok(());
    };
    Err(CoreError::InvalidTarget {
        path: original.to_path_buf(),
        reason: reason.to_string(),
    })
}

/// Manifest fields are tab separated, one record per line.
fn check_recordable(original: &Path) -> CoreResult<()> {
    let reason = match original.to_str() {
        None => "path is not valid UTF-8",
        Some(text) if text.contains(['\t', '\n', '\r']) => {
            "path contains a tab or line break"
        }
        Some(_) => return Ok(()),
    };
    Err(CoreError::InvalidTarget {
        path: original.to_path_buf(),
        reason: reason.to_string(),
    })
}
