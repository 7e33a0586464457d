//! Directory reading, walking, searching and disk usage.

use std::path::{Path, PathBuf};

use crate::error::{io_to_core, CoreError, CoreResult};
use crate::fs::entry::FileEntry;

/// One directory visited by [`walk`]: its path and the names of its
/// immediate children, split into directories and everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkDir {
    pub dir: PathBuf,
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

/// Size of one directory child as reported by [`disk_usage_children`].
#[derive(Debug, Clone)]
pub struct DiskUsage {
    pub entry: FileEntry,
    pub bytes: u64,
}

/// Reads the immediate contents of a directory and returns them as [`FileEntry`] values.
///
/// The returned entries are **unsorted**. Use [`crate::fs::sort::sort_entries`]
/// to apply sorting after reading.
///
/// # Errors
///
/// - [`CoreError::NotFound`]: the path does not exist.
/// - [`CoreError::NotADirectory`]: the path is not a directory.
/// - [`CoreError::PermissionDenied`]: read access is denied.
/// - [`CoreError::Io`]: any other I/O error.
pub fn read_directory(path: &Path) -> CoreResult<Vec<FileEntry>> {
    ensure_dir(path)?;

    let read_dir = std::fs::read_dir(path).map_err(|e| io_to_core(e, path))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let metadata = match dir_entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };
        entries.push(FileEntry::new(dir_entry.path(), &metadata));
    }

    Ok(entries)
}

/// Returns a [`FileEntry`] for `path` itself. Symlinks are not followed.
///
/// # Errors
///
/// - [`CoreError::NotFound`] / [`CoreError::PermissionDenied`] from `lstat`.
pub fn stat_entry(path: &Path) -> CoreResult<FileEntry> {
    let metadata = std::fs::symlink_metadata(path).map_err(|e| io_to_core(e, path))?;
    Ok(FileEntry::new(path.to_path_buf(), &metadata))
}

/// Walks `root` top-down, yielding one [`WalkDir`] per directory.
///
/// Child names are sorted. Symlinks are listed under `files` and never
/// followed. Subdirectories that cannot be read are skipped with a warning.
/// Hidden children are omitted (and not descended into) unless
/// `show_hidden` is set.
///
/// # Errors
///
/// - [`CoreError::NotFound`] / [`CoreError::NotADirectory`] for `root`.
/// - [`CoreError::PermissionDenied`] if `root` itself cannot be read.
pub fn walk(root: &Path, show_hidden: bool) -> CoreResult<Vec<WalkDir>> {
    ensure_dir(root)?;

    let mut out = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let read_dir = match std::fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(e) if dir == root => return Err(io_to_core(e, root)),
            Err(e) => {
                tracing::warn!("skipping unreadable directory {}: {e}", dir.display());
                continue;
            }
        };

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for dir_entry in read_dir.flatten() {
            let name = crate::nfc_string(&dir_entry.file_name().to_string_lossy());
            if !show_hidden && name.starts_with('.') {
                continue;
            }
            match dir_entry.file_type() {
                Ok(ft) if ft.is_dir() => dirs.push(name),
                Ok(_) => files.push(name),
                Err(_) => continue,
            }
        }
        dirs.sort();
        files.sort();

        // reversed so the stack pops children in name order
        for name in dirs.iter().rev() {
            pending.push(dir.join(name));
        }
        out.push(WalkDir { dir, dirs, files });
    }

    Ok(out)
}

/// Finds every file or directory under `root` whose name contains `needle`.
///
/// Matching is case-sensitive. Results are sorted by path.
pub fn search_by_name(root: &Path, needle: &str, show_hidden: bool) -> CoreResult<Vec<PathBuf>> {
    let mut hits: Vec<PathBuf> = walk(root, show_hidden)?
        .into_iter()
        .flat_map(|w| {
            let WalkDir { dir, dirs, files } = w;
            dirs.into_iter()
                .chain(files)
                .filter(|name| name.contains(needle))
                .map(move |name| dir.join(name))
                .collect::<Vec<_>>()
        })
        .collect();
    hits.sort();
    Ok(hits)
}

/// Returns the apparent size in bytes of `path`.
///
/// Files report their length. Directories report the sum of every entry
/// beneath them, hidden ones included. Symlinks count their own size and
/// are not followed.
pub fn disk_usage(path: &Path) -> CoreResult<u64> {
    let metadata = std::fs::symlink_metadata(path).map_err(|e| io_to_core(e, path))?;
    if !metadata.is_dir() {
        return Ok(metadata.len());
    }

    let mut total = 0;
    for visited in walk(path, true)? {
        for name in &visited.files {
            let file = visited.dir.join(name);
            match std::fs::symlink_metadata(&file) {
                Ok(m) => total += m.len(),
                Err(e) => tracing::warn!("cannot stat {}: {e}", file.display()),
            }
        }
    }
    Ok(total)
}

/// Computes [`disk_usage`] for each immediate child of `path`, largest first.
///
/// Ties are broken by name. Children that cannot be measured are skipped
/// with a warning, as [`walk`] does for unreadable subdirectories.
pub fn disk_usage_children(path: &Path, show_hidden: bool) -> CoreResult<Vec<DiskUsage>> {
    let mut usages = Vec::new();
    for entry in read_directory(path)? {
        if !show_hidden && entry.is_hidden() {
            continue;
        }
        let bytes = match disk_usage(entry.path()) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("skipping {}: {e}", entry.path().display());
                continue;
            }
        };
        usages.push(DiskUsage { entry, bytes });
    }
    usages.sort_by(|a, b| {
        b.bytes
            .cmp(&a.bytes)
            .then_with(|| a.entry.name().cmp(b.entry.name()))
    });
    Ok(usages)
}

fn ensure_dir(path: &Path) -> CoreResult<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_to_core(e, path))?;
    if !metadata.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}
