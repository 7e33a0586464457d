//! Directory tree snapshots and their text rendering.

use std::fs;
use std::path::Path;

use crate::error::{io_to_core, CoreError, CoreResult};

/// A single entry in a directory tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// File or directory name.
    pub name: String,
    /// `true` when this entry is a directory.
    pub is_dir: bool,
    /// Nesting depth (0 = direct child of the root).
    pub depth: usize,
    /// `true` when no sibling follows this entry.
    pub is_last: bool,
}

/// Builds a depth-first snapshot of the tree under `path`.
///
/// Directories come before files, then entries are ordered by name.
/// `max_depth` of `None` means unlimited. Subdirectories that cannot be read
/// appear as leaves.
///
/// # Errors
///
/// [`CoreError::NotADirectory`] if `path` is not a directory, plus the usual
/// not-found / permission mapping for `path` itself.
pub fn build_tree(
    path: &Path,
    max_depth: Option<usize>,
    show_hidden: bool,
) -> CoreResult<Vec<TreeEntry>> {
    if !path.is_dir() {
        if path.exists() {
            return Err(CoreError::NotADirectory(path.to_path_buf()));
        }
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    let children = sorted_children(path, show_hidden).map_err(|e| io_to_core(e, path))?;

    let mut entries = Vec::new();
    collect_tree(children, 0, max_depth, show_hidden, &mut entries);
    Ok(entries)
}

fn sorted_children(dir: &Path, show_hidden: bool) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut children: Vec<_> = fs::read_dir(dir)?
        .filter_map(|r| r.ok())
        .filter(|c| show_hidden || !c.file_name().to_string_lossy().starts_with('.'))
        .collect();

    // Sort: directories first, then by name
    children.sort_by(|a, b| {
        let a_is_dir = a.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        let b_is_dir = b.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        b_is_dir
            .cmp(&a_is_dir)
            .then_with(|| a.file_name().cmp(&b.file_name()))
    });
    Ok(children)
}

fn collect_tree(
    children: Vec<fs::DirEntry>,
    depth: usize,
    max_depth: Option<usize>,
    show_hidden: bool,
    entries: &mut Vec<TreeEntry>,
) {
    let count = children.len();
    for (idx, child) in children.into_iter().enumerate() {
        let name = crate::nfc_string(&child.file_name().to_string_lossy());
        let is_dir = child.file_type().map(|ft| ft.is_dir()).unwrap_or(false);

        entries.push(TreeEntry {
            name,
            is_dir,
            depth,
            is_last: idx + 1 == count,
        });

        if is_dir && max_depth.map_or(true, |max| depth < max) {
            match sorted_children(&child.path(), show_hidden) {
                Ok(grandchildren) => {
                    collect_tree(grandchildren, depth + 1, max_depth, show_hidden, entries)
                }
                Err(e) => tracing::warn!("cannot read {}: {e}", child.path().display()),
            }
        }
    }
}

/// Renders a snapshot with box-drawing connectors, one line per entry.
///
/// Directory names get a trailing `/`.
pub fn render_tree(entries: &[TreeEntry]) -> Vec<String> {
    // open[d] is true while the ancestor at depth d still has siblings below
    let mut open: Vec<bool> = Vec::new();
    let mut lines = Vec::with_capacity(entries.len());

    for entry in entries {
        open.truncate(entry.depth);
        let mut line: String = open
            .iter()
            .map(|&more| if more { "│   " } else { "    " })
            .collect();
        line.push_str(if entry.is_last { "└── " } else { "├── " });
        line.push_str(&entry.name);
        if entry.is_dir {
            line.push('/');
        }
        lines.push(line);
        open.push(!entry.is_last);
    }

    lines
}
