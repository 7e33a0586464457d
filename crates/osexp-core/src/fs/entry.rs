//! File entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

/// A single file or directory entry.
///
/// `FileEntry` is immutable; create new instances via [`FileEntry::new`].
/// Directory sizes are reported as `0`; use [`crate::fs::ops::disk_usage`]
/// for the size of everything beneath a directory.
///
/// # Examples
///
/// ```no_run
/// use osexp_core::FileEntry;
/// use std::fs;
///
/// let metadata = fs::metadata("Cargo.toml").unwrap();
/// let entry = FileEntry::new("Cargo.toml".into(), &metadata);
/// assert_eq!(entry.name(), "Cargo.toml");
/// assert!(!entry.is_dir());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    size: u64,
    modified: Option<SystemTime>,
    is_dir: bool,
    is_hidden: bool,
    is_symlink: bool,
    readonly: bool,
}

impl FileEntry {
    /// Creates a new `FileEntry` from a path and its metadata.
    ///
    /// Hidden files are detected by a leading `.` in the file name.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let is_hidden = name.starts_with('.');

        Self {
            path,
            name,
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
            is_dir: metadata.is_dir(),
            is_hidden,
            is_symlink: metadata.is_symlink(),
            readonly: metadata.permissions().readonly(),
        }
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file size in bytes. Always `0` for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the last-modified time, if available.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    /// Returns `true` if the write permission bits are all cleared.
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Short label for the entry type: `dir`, `link` or `file`.
    pub fn kind(&self) -> &'static str {
        if self.is_symlink {
            "link"
        } else if self.is_dir {
            "dir"
        } else {
            "file"
        }
    }
}
