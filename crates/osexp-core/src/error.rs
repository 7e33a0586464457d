//! Error types for `osexp-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::io;
use std::path::{Path, PathBuf};

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message. Move failures and manifest failures are kept
/// apart so a caller can tell "nothing happened" from "the item moved
/// but its provenance was not recorded".
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The path cannot be used for the requested operation.
    #[error("invalid target {path}: {reason}")]
    InvalidTarget { path: PathBuf, reason: String },

    /// A rename between two locations failed.
    #[error("failed to move {from} to {to}")]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The item was moved into the trash but the manifest line could not be written.
    #[error("moved to {trashed} but failed to record it in {manifest}")]
    ManifestWrite {
        trashed: PathBuf,
        manifest: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A manifest record points at an item that is no longer in the trash.
    #[error("trashed file is missing: {0}")]
    MissingTrashedFile(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout `osexp-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Maps an I/O error on `path` to the most specific [`CoreError`] variant.
pub fn io_to_core(err: io::Error, path: &Path) -> CoreError {
    match err.kind() {
        io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
        _ => CoreError::Io(err),
    }
}

/// Maps a failed rename to [`CoreError::PermissionDenied`] or [`CoreError::MoveFailed`].
pub(crate) fn rename_error(err: io::Error, from: &Path, to: &Path) -> CoreError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        CoreError::PermissionDenied(from.to_path_buf())
    } else {
        CoreError::MoveFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source: err,
        }
    }
}
