//! osexp core library: UI-agnostic filesystem explorer logic.
//!
//! `osexp-core` provides the types and operations behind the `osexp`
//! command-line tool, decoupled from argument parsing and output so they
//! can be tested directly.
//!
//! # Modules
//!
//! - [`trash`]: reversible deletion (the manifest log, move-to-trash, restore).
//! - [`fs`]: [`FileEntry`], directory reads, walks, search, disk usage, trees.
//! - [`config`]: User-facing configuration (TOML-based settings).
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod fs;
pub mod trash;

pub use config::settings::Config;
pub use error::{CoreError, CoreResult};
pub use fs::entry::FileEntry;
pub use fs::ops::{
    disk_usage, disk_usage_children, read_directory, search_by_name, stat_entry, walk,
};
pub use fs::size::format_size;
pub use fs::sort::{filter_hidden, sort_entries, SortDirection, SortField};
pub use fs::tree::{build_tree, render_tree};
pub use trash::{move_to_trash, restore, restore_candidates, RestoreOutcome, TrashOutcome};

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames in NFD (decomposed), which splits Hangul and
/// accented Latin characters into separate code points. This helper
/// re-composes them.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
