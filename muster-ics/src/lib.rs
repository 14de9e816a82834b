//! Calendar export for Muster.
//!
//! This crate turns event records into RFC 5545 documents:
//! - `event` holds the record handed over by the application
//! - `ics` builds, escapes, folds and formats calendar documents
//! - `delivery` writes finished documents to files or streams

pub mod clock;
pub mod config;
pub mod delivery;
pub mod error;
pub mod event;
pub mod ics;
mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use delivery::{DocumentSink, deliver_as_file};
pub use error::{ExportError, ExportResult};
pub use event::Event;
pub use ics::{CalendarDocumentBuilder, build_multi_event_document, build_single_event_document};
