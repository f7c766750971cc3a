//! Fixed timestamp used when no date formatter is available.

use chrono::{DateTime, Datelike, Local};

/// `D-M-YYYY HH:mm:ss`: unpadded day and month, 24-hour clock.
#[must_use]
pub fn legacy_timestamp(date: &DateTime<Local>) -> String {
    format!(
        "{}-{}-{} {}",
        date.day(),
        date.month(),
        date.year(),
        date.format("%H:%M:%S")
    )
}
