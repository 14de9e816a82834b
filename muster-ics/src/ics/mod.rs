//! ICS document generation.
//!
//! This module writes calendar documents according to RFC 5545: TEXT
//! escaping, 75-octet line folding, DATE / DATE-TIME formatting and the
//! VCALENDAR / VEVENT layout.

mod document;
mod escape;
mod fold;
mod format;
mod read;

pub use document::{
    CalendarDocumentBuilder, DEFAULT_PROD_ID, DEFAULT_UID_DOMAIN, build_multi_event_document,
    build_single_event_document,
};
pub(crate) use document::check_raw_value;
pub use escape::{escape_text, unescape_text};
pub use fold::{MAX_LINE_OCTETS, fold_line, unfold};
pub use format::{format_date, format_utc_datetime};
pub use read::{ParsedEvent, ParsedProperty, read_events};
