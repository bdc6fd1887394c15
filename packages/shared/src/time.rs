use chrono::{DateTime, SecondsFormat, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a Unix timestamp (milliseconds) as RFC 3339 in UTC, e.g. `2024-01-01T00:00:00.000Z`.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
