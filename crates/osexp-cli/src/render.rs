//! Text rendering for command output.

use std::fmt::Write as _;
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};
use osexp_core::trash::ManifestRecord;
use osexp_core::{format_size, FileEntry};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats a timestamp in local time. An invalid `fmt` falls back to
/// `%Y-%m-%d %H:%M` instead of failing.
pub fn format_time(time: SystemTime, fmt: &str) -> String {
    format_datetime(&DateTime::<Local>::from(time), fmt)
}

/// Formats Unix seconds in local time.
pub fn format_epoch(epoch: u64, fmt: &str) -> String {
    let secs = i64::try_from(epoch).unwrap_or(i64::MAX);
    match Local.timestamp_opt(secs, 0).single() {
        Some(dt) => format_datetime(&dt, fmt),
        None => epoch.to_string(),
    }
}

fn format_datetime(dt: &DateTime<Local>, fmt: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", dt.format(fmt)).is_ok() {
        return out;
    }
    tracing::debug!("invalid date format {fmt:?}, using {FALLBACK_DATE_FORMAT}");
    dt.format(FALLBACK_DATE_FORMAT).to_string()
}

/// One `list` line: kind, size (blank for directories), name.
pub fn list_line(entry: &FileEntry) -> String {
    let size = if entry.is_dir() {
        "-".to_string()
    } else {
        format_size(entry.size())
    };
    let suffix = if entry.is_dir() { "/" } else { "" };
    format!("{:<4} {:>10}  {}{}", entry.kind(), size, entry.name(), suffix)
}

/// The `info` block for one entry.
pub fn info_lines(entry: &FileEntry, date_format: &str) -> Vec<String> {
    let modified = entry
        .modified()
        .map(|t| format_time(t, date_format))
        .unwrap_or_else(|| "unknown".to_string());
    let mut lines = vec![
        format!("path:     {}", entry.path().display()),
        format!("type:     {}", entry.kind()),
    ];
    if !entry.is_dir() {
        lines.push(format!(
            "size:     {} ({} bytes)",
            format_size(entry.size()),
            entry.size()
        ));
    }
    lines.push(format!("modified: {modified}"));
    lines.push(format!(
        "readonly: {}",
        if entry.is_readonly() { "yes" } else { "no" }
    ));
    lines
}

/// One `du` line: human size, tab, path.
pub fn du_line(bytes: u64, label: &str) -> String {
    format!("{}\t{label}", format_size(bytes))
}

/// One `trash-list` line: when, trashed name, original location.
pub fn trash_line(record: &ManifestRecord, date_format: &str) -> String {
    format!(
        "{}  {}  {}",
        format_epoch(record.epoch(), date_format),
        record.trashed_name(),
        record.original_path().display()
    )
}
