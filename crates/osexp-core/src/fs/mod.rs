//! File system abstractions for osexp.
//!
//! This module provides the entry type ([`entry::FileEntry`]), directory
//! reads and recursive walks ([`ops`]), tree snapshots ([`tree`]), sorting
//! ([`sort`]) and the byte humanizer ([`size::format_size`]).

pub mod entry;
pub mod ops;
pub mod size;
pub mod sort;
pub mod tree;

pub use ops::{DiskUsage, WalkDir};
pub use tree::TreeEntry;
