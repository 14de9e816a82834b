//! Calendar document assembly.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::escape::escape_text;
use super::fold::fold_line;
use super::format::{exclusive_end_date, format_date, format_utc_datetime, local_date};
use crate::clock::{Clock, SystemClock};
use crate::error::{ExportError, ExportResult};
use crate::event::Event;

pub const DEFAULT_PROD_ID: &str = "-//Muster//Calendar Export//EN";
pub const DEFAULT_UID_DOMAIN: &str = "muster.app";

const CRLF: &str = "\r\n";

/// Turns events into RFC 5545 documents.
///
/// The builder holds no per-call state and can be shared across threads.
#[derive(Clone)]
pub struct CalendarDocumentBuilder {
    prod_id: String,
    uid_domain: String,
    clock: Arc<dyn Clock>,
}

impl Default for CalendarDocumentBuilder {
    fn default() -> Self {
        CalendarDocumentBuilder {
            prod_id: DEFAULT_PROD_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl fmt::Debug for CalendarDocumentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarDocumentBuilder")
            .field("prod_id", &self.prod_id)
            .field("uid_domain", &self.uid_domain)
            .finish_non_exhaustive()
    }
}

impl CalendarDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prod_id(mut self, prod_id: impl Into<String>) -> Self {
        self.prod_id = prod_id.into();
        self
    }

    pub fn uid_domain(mut self, uid_domain: impl Into<String>) -> Self {
        self.uid_domain = uid_domain.into();
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Stable UID for an event: the same id always maps to the same UID.
    pub fn uid_for(&self, event: &Event) -> String {
        format!("{}@{}", event.id, self.uid_domain)
    }

    /// Build a document holding exactly one VEVENT.
    pub fn build_single(&self, event: &Event) -> ExportResult<String> {
        let dtstamp = format_utc_datetime(&self.clock.now());
        let mut document = self.open_calendar()?;
        let vevent = self.render_event(event, &dtstamp)?;
        document.push_str(&vevent);
        self.close_calendar(&mut document);

        debug!(event_id = %event.id, bytes = document.len(), "Built calendar document");
        Ok(document)
    }

    /// Build one document wrapping every event, in the order given.
    ///
    /// An empty slice yields an empty string, which is not a valid calendar
    /// and must not be delivered. The first invalid event aborts the whole
    /// batch.
    pub fn build_multi(&self, events: &[Event]) -> ExportResult<String> {
        if events.is_empty() {
            warn!("No events to export, returning empty document");
            return Ok(String::new());
        }

        let dtstamp = format_utc_datetime(&self.clock.now());
        let mut document = self.open_calendar()?;

        for (index, event) in events.iter().enumerate() {
            let vevent = self.render_event(event, &dtstamp).map_err(|source| {
                ExportError::InvalidBatchEvent {
                    index,
                    id: event.id.clone(),
                    source: Box::new(source),
                }
            })?;
            document.push_str(&vevent);
        }

        self.close_calendar(&mut document);

        debug!(
            events = events.len(),
            bytes = document.len(),
            "Built calendar document"
        );
        Ok(document)
    }

    fn open_calendar(&self) -> ExportResult<String> {
        check_raw_value("prod_id", &self.prod_id)?;
        check_raw_value("uid_domain", &self.uid_domain)?;

        let mut document = String::new();
        push_line(&mut document, "BEGIN:VCALENDAR");
        push_line(&mut document, "VERSION:2.0");
        push_line(&mut document, &format!("PRODID:{}", self.prod_id));
        push_line(&mut document, "CALSCALE:GREGORIAN");
        push_line(&mut document, "METHOD:PUBLISH");
        Ok(document)
    }

    fn close_calendar(&self, document: &mut String) {
        push_line(document, "END:VCALENDAR");
    }

    /// Render one VEVENT block. Every field is validated before anything is
    /// written.
    fn render_event(&self, event: &Event, dtstamp: &str) -> ExportResult<String> {
        check_raw_value("id", &event.id)?;
        let start = event.start()?;
        let end = event.end()?;
        let created = format_utc_datetime(&event.created()?);
        let last_modified = format_utc_datetime(&event.updated()?);

        let (dtstart, dtend) = if event.is_all_day {
            let dtend = match end {
                Some(end) => Some(format!(
                    "DTEND;VALUE=DATE:{}",
                    format_date(exclusive_end_date(local_date(&end))?)
                )),
                None => None,
            };
            (
                format!("DTSTART;VALUE=DATE:{}", format_date(local_date(&start))),
                dtend,
            )
        } else {
            (
                format!("DTSTART:{}", format_utc_datetime(&start)),
                end.map(|end| format!("DTEND:{}", format_utc_datetime(&end))),
            )
        };

        let mut vevent = String::new();
        push_line(&mut vevent, "BEGIN:VEVENT");
        push_line(&mut vevent, &format!("UID:{}", self.uid_for(event)));
        push_line(&mut vevent, &format!("DTSTAMP:{dtstamp}"));
        push_line(&mut vevent, &dtstart);
        if let Some(ref dtend) = dtend {
            push_line(&mut vevent, dtend);
        }
        push_line(&mut vevent, &format!("SUMMARY:{}", escape_text(&event.title)));
        if let Some(ref description) = event.description {
            push_line(
                &mut vevent,
                &format!("DESCRIPTION:{}", escape_text(description)),
            );
        }
        if let Some(ref location) = event.location {
            push_line(&mut vevent, &format!("LOCATION:{}", escape_text(location)));
        }
        push_line(&mut vevent, &format!("CREATED:{created}"));
        push_line(&mut vevent, &format!("LAST-MODIFIED:{last_modified}"));
        push_line(&mut vevent, "END:VEVENT");

        Ok(vevent)
    }
}

/// Reject values written without TEXT escaping (UID, PRODID) if they
/// contain control characters. A CR or LF there would start a new line.
pub(crate) fn check_raw_value(field: &'static str, value: &str) -> ExportResult<()> {
    match value.chars().find(|c| c.is_control()) {
        Some(c) => Err(ExportError::validation(
            field,
            format!("contains control character {:?}", c),
        )),
        None => Ok(()),
    }
}

/// Append a folded content line and its CRLF terminator.
fn push_line(out: &mut String, line: &str) {
    out.push_str(&fold_line(line));
    out.push_str(CRLF);
}

/// Build a single-event document with the default builder.
pub fn build_single_event_document(event: &Event) -> ExportResult<String> {
    CalendarDocumentBuilder::default().build_single(event)
}

/// Build a multi-event document with the default builder.
pub fn build_multi_event_document(events: &[Event]) -> ExportResult<String> {
    CalendarDocumentBuilder::default().build_multi(events)
}
