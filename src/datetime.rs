//! Date/time utilities for SDROP.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Default display format for timestamps.
pub const DEFAULT_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Format a DateTime<Utc> in the specified timezone.
///
/// # Arguments
///
/// * `dt` - DateTime in UTC
/// * `timezone` - Timezone name (e.g., "Asia/Tokyo", "UTC")
/// * `format` - Output format string (e.g., "%Y/%m/%d %H:%M")
///
/// Unknown timezones fall back to UTC.
pub fn format_utc_datetime(dt: &DateTime<Utc>, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return dt.format(format).to_string(),
    };
    dt.with_timezone(&tz).format(format).to_string()
}

/// Format a DateTime<Utc> with the default format.
pub fn format_datetime_default(dt: &DateTime<Utc>, timezone: &str) -> String {
    format_utc_datetime(dt, timezone, DEFAULT_FORMAT)
}

/// Describe how long until `expires_at`, relative to `now`.
///
/// Returns "expired" once the moment has passed, otherwise the largest
/// whole unit: "in 6 days", "in 1 hour", "in 12 minutes", "in less than a minute".
pub fn format_remaining(expires_at: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let remaining = *expires_at - *now;
    if remaining <= chrono::Duration::zero() {
        return "expired".to_string();
    }

    let days = remaining.num_days();
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes();

    let (value, unit) = if days > 0 {
        (days, "day")
    } else if hours > 0 {
        (hours, "hour")
    } else if minutes > 0 {
        (minutes, "minute")
    } else {
        return "in less than a minute".to_string();
    };

    if value == 1 {
        format!("in 1 {unit}")
    } else {
        format!("in {value} {unit}s")
    }
}

/// Format an expiry timestamp as "2024/01/15 10:30 (in 6 days)".
pub fn format_expiry(expires_at: &DateTime<Utc>, now: &DateTime<Utc>, timezone: &str) -> String {
    format!(
        "{} ({})",
        format_datetime_default(expires_at, timezone),
        format_remaining(expires_at, now)
    )
}
