//! Reversible deletion.
//!
//! Deleted items are renamed into `<root>/.trash/` as `<epoch>_<name>` and
//! a line is appended to `<root>/.trash/manifest.tsv` recording where they
//! came from ([`manifest`]). [`mover::move_to_trash`] performs the
//! move-then-log sequence; [`restore::restore`] scans the log newest first
//! and moves the item back.

pub mod manifest;
pub mod mover;
pub mod paths;
pub mod restore;

pub use manifest::{Manifest, ManifestRecord, MANIFEST_HEADER, MANIFEST_NAME};
pub use mover::{move_to_trash, move_to_trash_at, Clock, SystemClock, TrashOutcome};
pub use paths::{resolve_root, trash_dir_for, TRASH_DIR_NAME};
pub use restore::{restore, restore_candidates, restore_destination, RestoreOutcome};
