//! Parsing of the textual timestamps found on event records.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

use crate::error::{ExportError, ExportResult};

/// Backend style: `2025-07-04 19:00:00+00`, optionally with fractional seconds.
const BACKEND_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

/// Parse an absolute instant.
///
/// Accepts RFC 3339, the backend's space-separated form and bare
/// `YYYY-MM-DD` dates (midnight UTC). A timestamp without an offset is not an
/// absolute instant and is rejected.
pub fn parse_instant(field: &'static str, raw: &str) -> ExportResult<DateTime<FixedOffset>> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ExportError::validation(field, "empty timestamp"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }

    if let Ok(dt) = DateTime::parse_from_str(value, BACKEND_FORMAT) {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }

    Err(ExportError::validation(
        field,
        format!("'{value}' is not an absolute timestamp"),
    ))
}
