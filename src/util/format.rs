//! Value formatters for table cells and progress-bar labels.
//!
//! Memory values arrive from the resource manager in MiB, timestamps and
//! durations in milliseconds.

use chrono::{Local, TimeZone};

/// Memory unit thresholds in MiB, checked largest first.
///
/// The divisor doubles as the threshold, so `3072` MiB renders as `1.50G`.
const MEMORY_UNITS: [(i64, &str); 3] = [(2 << 30, "P"), (2 << 20, "T"), (2 << 10, "G")];

/// Elapsed time units in seconds, largest first.
const ELAPSED_UNITS: [(i64, &str); 3] = [(86_400, "d"), (3_600, "h"), (60, "m")];

/// Formats a memory amount given in MiB.
///
/// ```
/// use hdtop::util::format_memory;
///
/// assert_eq!(format_memory(500), "500.00M");
/// assert_eq!(format_memory(3072), "1.50G");
/// ```
pub fn format_memory(mib: i64) -> String {
    for (size, unit) in MEMORY_UNITS {
        if mib >= size {
            return format!("{:.2}{}", mib as f64 / size as f64, unit);
        }
    }
    format!("{:.2}M", mib as f64)
}

/// Formats a percentage with one decimal place.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value)
}

/// Formats epoch milliseconds as local wall-clock time (`HH:MM:SS`).
///
/// Out-of-range timestamps fall back to the raw number.
pub fn format_datetime(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => epoch_ms.to_string(),
    }
}

/// Formats an elapsed duration in milliseconds as `1d 2h 3m`.
///
/// Zero components are omitted; anything under one minute is `<1m`.
pub fn format_elapsed_time(elapsed_ms: i64) -> String {
    let mut remaining = elapsed_ms / 1000;
    let mut parts = Vec::new();

    for (size, unit) in ELAPSED_UNITS {
        if remaining >= size {
            parts.push(format!("{}{}", remaining / size, unit));
            remaining %= size;
        }
    }

    if parts.is_empty() {
        "<1m".to_string()
    } else {
        parts.join(" ")
    }
}
