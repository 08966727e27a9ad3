pub mod alert;
pub mod community;
pub mod job;
pub mod profile;
pub mod resources;

use chrono::{DateTime, NaiveDate, Utc};

/// Parses a backend timestamp into epoch millis.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
/// Anything else is `None`; callers treat it as incomparable.
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Salary label shared by every job-shaped view.
pub fn salary_label(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) if min == max => format!("${min:.0}"),
        (Some(min), Some(max)) => format!("${min:.0} - ${max:.0}"),
        (Some(min), None) => format!("From ${min:.0}"),
        (None, Some(max)) => format!("Up to ${max:.0}"),
        (None, None) => "Salary not disclosed".to_string(),
    }
}
