//! Human-readable byte counts.

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Formats `bytes` in 1024 steps: `512 B`, `1.5 KB`, `3.0 GB`.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;

    if bytes < KB {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / KB as f64;
    let mut unit = 0;
    while value >= KB as f64 && unit + 1 < UNITS.len() {
        value /= KB as f64;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
