//! Sorting and filtering for file entries.

use std::str::FromStr;

use crate::error::CoreError;
use crate::fs::entry::FileEntry;

/// The field by which entries are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Sort alphabetically by name (case-insensitive).
    Name,
    /// Sort by file size in bytes.
    Size,
    /// Sort by last-modified time.
    Date,
    /// Sort by file extension (case-insensitive).
    Type,
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "size" => Ok(Self::Size),
            "date" | "modified" => Ok(Self::Date),
            "type" | "ext" => Ok(Self::Type),
            other => Err(CoreError::ConfigParse(format!("unknown sort field: {other}"))),
        }
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sorts a list of file entries by the given field and direction.
///
/// When `dirs_first` is `true`, directories always appear before files
/// regardless of the sort field. Ties fall back to the name so output is
/// stable across runs. The input slice is never mutated.
pub fn sort_entries(
    entries: &[FileEntry],
    field: SortField,
    direction: SortDirection,
    dirs_first: bool,
) -> Vec<FileEntry> {
    let mut sorted: Vec<FileEntry> = entries.to_vec();

    sorted.sort_by(|a, b| {
        if dirs_first {
            let dir_cmp = b.is_dir().cmp(&a.is_dir());
            if dir_cmp != std::cmp::Ordering::Equal {
                return dir_cmp;
            }
        }

        let ord = compare_by_field(a, b, field).then_with(|| a.name().cmp(b.name()));

        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    sorted
}

fn compare_by_field(a: &FileEntry, b: &FileEntry, field: SortField) -> std::cmp::Ordering {
    match field {
        SortField::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        SortField::Size => a.size().cmp(&b.size()),
        SortField::Date => a.modified().cmp(&b.modified()),
        SortField::Type => extension_lower(a).cmp(&extension_lower(b)),
    }
}

fn extension_lower(entry: &FileEntry) -> String {
    entry
        .path()
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Filters out hidden entries when `show_hidden` is `false`.
pub fn filter_hidden(entries: &[FileEntry], show_hidden: bool) -> Vec<FileEntry> {
    if show_hidden {
        return entries.to_vec();
    }
    entries.iter().filter(|e| !e.is_hidden()).cloned().collect()
}
