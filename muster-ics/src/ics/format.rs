//! DATE and DATE-TIME value formatting.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::error::{ExportError, ExportResult};

/// `YYYYMMDDTHHMMSSZ` in UTC, whatever offset the instant carries.
pub fn format_utc_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

/// `YYYYMMDD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Calendar date of an instant as seen in its own UTC offset.
pub fn local_date(instant: &DateTime<FixedOffset>) -> NaiveDate {
    instant.date_naive()
}

/// Exclusive DTEND date for an inclusive all-day end.
pub fn exclusive_end_date(inclusive_end: NaiveDate) -> ExportResult<NaiveDate> {
    inclusive_end
        .checked_add_days(Days::new(1))
        .ok_or_else(|| ExportError::validation("end_date", "date out of range"))
}
