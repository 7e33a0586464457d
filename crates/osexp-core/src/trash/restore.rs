//! Resolving a name back to a trashed item and moving it home.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{io_to_core, rename_error, CoreError, CoreResult};
use crate::trash::manifest::{Manifest, ManifestRecord};
use crate::trash::paths::resolve_root;

/// Inserted before the extension when the original location is occupied.
pub const RESTORED_SUFFIX: &str = "_restored";

/// What [`restore`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The item was moved from `from` (inside the trash) to `to`.
    Restored {
        from: PathBuf,
        to: PathBuf,
        record: ManifestRecord,
    },
    /// There is no manifest under the root.
    NothingToRestore,
    /// The manifest has no record for the requested name.
    NoMatch,
}

/// Restores the most recently trashed item whose original path ends with `name`.
///
/// Records are scanned newest first. A record whose item is no longer in
/// the trash is passed over in favour of the next older match; the log is
/// never rewritten, so this is how an already restored entry is told apart
/// from a live one. If the original location is occupied the item is
/// restored next to it with [`RESTORED_SUFFIX`] before the extension.
///
/// # Errors
///
/// - [`CoreError::MissingTrashedFile`] if every matching record points at
///   an item that is gone (reports the newest one).
/// - [`CoreError::MoveFailed`] / [`CoreError::PermissionDenied`] if the
///   rename back fails.
/// - [`CoreError::Io`] if the manifest cannot be read.
pub fn restore(name: &str, root: Option<&Path>) -> CoreResult<RestoreOutcome> {
    let root = resolve_root(root);
    let manifest = Manifest::open(&root);
    if !manifest.exists() {
        tracing::debug!("no manifest at {}", manifest.path().display());
        return Ok(RestoreOutcome::NothingToRestore);
    }

    let mut newest_missing: Option<PathBuf> = None;

    for record in manifest.matching_newest_first(name)? {
        let trashed = record.trashed_path_in(manifest.trash_dir());
        if fs::symlink_metadata(&trashed).is_err() {
            tracing::debug!(
                "manifest entry {} has no item at {}",
                record.trashed_name(),
                trashed.display()
            );
            newest_missing.get_or_insert(trashed);
            continue;
        }

        let dest = restore_destination(record.original_path());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| io_to_core(e, parent))?;
        }
        fs::rename(&trashed, &dest).map_err(|e| rename_error(e, &trashed, &dest))?;

        tracing::info!("restored {} -> {}", trashed.display(), dest.display());
        return Ok(RestoreOutcome::Restored {
            from: trashed,
            to: dest,
            record,
        });
    }

    match newest_missing {
        Some(path) => Err(CoreError::MissingTrashedFile(path)),
        None => Ok(RestoreOutcome::NoMatch),
    }
}

/// Lists every parseable manifest record under `root`, newest first.
pub fn restore_candidates(root: Option<&Path>) -> CoreResult<Vec<ManifestRecord>> {
    let root = resolve_root(root);
    let mut records = Manifest::open(&root).records()?;
    records.reverse();
    Ok(records)
}

/// Picks where a record should be restored to without clobbering anything.
///
/// Returns `original` when it is free, otherwise `<stem>_restored.<ext>`.
/// If that is taken as well a counter is appended (`<stem>_restored_2.<ext>`).
pub fn restore_destination(original: &Path) -> PathBuf {
    if !occupied(original) {
        return original.to_path_buf();
    }
    let candidate = with_suffix(original, RESTORED_SUFFIX);
    if !occupied(&candidate) {
        return candidate;
    }
    (2..)
        .map(|n| with_suffix(original, &format!("{RESTORED_SUFFIX}_{n}")))
        .find(|p| !occupied(p))
        .unwrap_or(candidate)
}

fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trash::mover::move_to_trash_at;
    use crate::trash::mover::tests::FixedClock;
    use tempfile::TempDir;

    fn restored(outcome: RestoreOutcome) -> (PathBuf, PathBuf) {
        match outcome {
            RestoreOutcome::Restored { from, to, .. } => (from, to),
            other => panic!("expected Restored, got {other:?}"),
        }
    }

    #[test]
    fn file_round_trip() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let target = root.join("notes.txt");
        fs::write(&target, b"line one\nline two\n").unwrap();
        move_to_trash_at(&target, Some(root), &FixedClock(1_700_000_000)).unwrap();

        let (from, to) = restored(restore("notes.txt", Some(root)).unwrap());

        assert_eq!(from, root.join(".trash").join("1700000000_notes.txt"));
        assert_eq!(to, target);
        assert_eq!(fs::read(&target).unwrap(), b"line one\nline two\n");
        assert!(!from.exists());
    }

    #[test]
    fn directory_round_trip() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let dir = root.join("project");
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("src").join("main.rs"), "fn main() {}").unwrap();
        move_to_trash_at(&dir, Some(root), &FixedClock(2)).unwrap();
        assert!(!dir.exists());

        let (_, to) = restored(restore("project", Some(root)).unwrap());

        assert_eq!(to, dir);
        assert_eq!(
            fs::read_to_string(dir.join("src").join("main.rs")).unwrap(),
            "fn main() {}"
        );
    }

    #[test]
    fn occupied_destination_gets_suffix() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let target = root.join("report.txt");
        fs::write(&target, "old").unwrap();
        move_to_trash_at(&target, Some(root), &FixedClock(1)).unwrap();
        fs::write(&target, "new").unwrap();

        let (_, to) = restored(restore("report.txt", Some(root)).unwrap());

        assert_eq!(to, root.join("report_restored.txt"));
        assert_eq!(fs::read_to_string(&to).unwrap(), "old");
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn occupied_suffix_gets_counter() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let target = root.join("report.txt");
        fs::write(&target, "old").unwrap();
        move_to_trash_at(&target, Some(root), &FixedClock(1)).unwrap();
        fs::write(&target, "new").unwrap();
        fs::write(root.join("report_restored.txt"), "earlier").unwrap();

        let (_, to) = restored(restore("report.txt", Some(root)).unwrap());

        assert_eq!(to, root.join("report_restored_2.txt"));
        assert_eq!(
            fs::read_to_string(root.join("report_restored.txt")).unwrap(),
            "earlier"
        );
    }

    #[test]
    fn suffix_placement() {
        assert_eq!(
            with_suffix(Path::new("/ws/report.txt"), RESTORED_SUFFIX),
            PathBuf::from("/ws/report_restored.txt")
        );
        assert_eq!(
            with_suffix(Path::new("/ws/notes"), RESTORED_SUFFIX),
            PathBuf::from("/ws/notes_restored")
        );
        assert_eq!(
            with_suffix(Path::new("/ws/.bashrc"), RESTORED_SUFFIX),
            PathBuf::from("/ws/.bashrc_restored")
        );
        assert_eq!(
            with_suffix(Path::new("/ws/a.tar.gz"), RESTORED_SUFFIX),
            PathBuf::from("/ws/a.tar_restored.gz")
        );
    }

    #[test]
    fn newest_wins_then_next_newest() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let first = root.join("a").join("x");
        let second = root.join("b").join("x");
        fs::create_dir_all(first.parent().unwrap()).unwrap();
        fs::create_dir_all(second.parent().unwrap()).unwrap();
        fs::write(&first, "from a").unwrap();
        fs::write(&second, "from b").unwrap();

        move_to_trash_at(&first, Some(root), &FixedClock(100)).unwrap();
        move_to_trash_at(&second, Some(root), &FixedClock(200)).unwrap();

        let (_, to) = restored(restore("x", Some(root)).unwrap());
        assert_eq!(to, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "from b");

        let (_, to) = restored(restore("x", Some(root)).unwrap());
        assert_eq!(to, first);
        assert_eq!(fs::read_to_string(&first).unwrap(), "from a");
    }

    #[test]
    fn partial_path_selects_directory() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let first = root.join("a").join("x");
        let second = root.join("b").join("x");
        fs::create_dir_all(first.parent().unwrap()).unwrap();
        fs::create_dir_all(second.parent().unwrap()).unwrap();
        fs::write(&first, "from a").unwrap();
        fs::write(&second, "from b").unwrap();
        move_to_trash_at(&first, Some(root), &FixedClock(100)).unwrap();
        move_to_trash_at(&second, Some(root), &FixedClock(200)).unwrap();

        let (_, to) = restored(restore("a/x", Some(root)).unwrap());
        assert_eq!(to, first);
    }

    #[test]
    fn missing_manifest_is_nothing_to_restore() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            restore("anything", Some(tmp.path())).unwrap(),
            RestoreOutcome::NothingToRestore
        );
    }

    #[test]
    fn unknown_name_is_no_match() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let target = root.join("kept.txt");
        fs::write(&target, "x").unwrap();
        move_to_trash_at(&target, Some(root), &FixedClock(1)).unwrap();

        assert_eq!(
            restore("other.txt", Some(root)).unwrap(),
            RestoreOutcome::NoMatch
        );
    }

    #[test]
    fn malformed_lines_do_not_stop_the_scan() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let target = root.join("keep.md");
        fs::write(&target, "body").unwrap();
        move_to_trash_at(&target, Some(root), &FixedClock(5)).unwrap();

        let manifest = Manifest::open(root);
        let mut content = fs::read_to_string(manifest.path()).unwrap();
        content.push_str("6\tonly-two-fields\n");
        fs::write(manifest.path(), content).unwrap();

        let (_, to) = restored(restore("keep.md", Some(root)).unwrap());
        assert_eq!(to, target);
    }

    #[test]
    fn removed_item_reports_missing_trashed_file() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let target = root.join("gone.txt");
        fs::write(&target, "x").unwrap();
        let outcome = move_to_trash_at(&target, Some(root), &FixedClock(8)).unwrap();
        fs::remove_file(&outcome.trashed_path).unwrap();

        let err = restore("gone.txt", Some(root)).unwrap_err();
        assert!(
            matches!(err, CoreError::MissingTrashedFile(ref p) if *p == outcome.trashed_path)
        );
    }

    #[test]
    fn restore_twice_reports_missing_after_log_is_exhausted() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let target = root.join("once.txt");
        fs::write(&target, "x").unwrap();
        move_to_trash_at(&target, Some(root), &FixedClock(8)).unwrap();

        restored(restore("once.txt", Some(root)).unwrap());
        let err = restore("once.txt", Some(root)).unwrap_err();
        assert!(matches!(err, CoreError::MissingTrashedFile(_)));
    }

    #[test]
    fn legacy_absolute_trashed_path_is_used_verbatim() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let manifest = Manifest::ensure(root).unwrap();
        let stored = manifest.trash_dir().join("old_item");
        fs::write(&stored, "legacy").unwrap();
        let original = root.join("item.cfg");
        manifest
            .append(&ManifestRecord::new(
                1,
                stored.display().to_string(),
                original.clone(),
            ))
            .unwrap();

        let (from, to) = restored(restore("item.cfg", Some(root)).unwrap());
        assert_eq!(from, stored);
        assert_eq!(to, original);
        assert_eq!(fs::read_to_string(&original).unwrap(), "legacy");
    }

    #[test]
    fn recreates_missing_parent_directory() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        let nested = root.join("deep").join("file.txt");
        fs::create_dir_all(nested.parent().unwrap()).unwrap();
        fs::write(&nested, "x").unwrap();
        move_to_trash_at(&nested, Some(root), &FixedClock(4)).unwrap();
        fs::remove_dir(root.join("deep")).unwrap();

        let (_, to) = restored(restore("file.txt", Some(root)).unwrap());
        assert_eq!(to, nested);
        assert!(nested.is_file());
    }

    #[test]
    fn candidates_are_newest_first() {
        let tmp = TempDir::new().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let root = root.as_path();
        for (epoch, name) in [(1, "a"), (2, "b"), (3, "c")] {
            let path = root.join(name);
            fs::write(&path, name).unwrap();
            move_to_trash_at(&path, Some(root), &FixedClock(epoch)).unwrap();
        }

        let epochs: Vec<u64> = restore_candidates(Some(root))
            .unwrap()
            .iter()
            .map(ManifestRecord::epoch)
            .collect();
        assert_eq!(epochs, vec![3, 2, 1]);
    }
}
