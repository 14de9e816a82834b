//! The event record handed over by the application layer.
//!
//! Temporal fields arrive as text (the backend serializes timestamps as
//! strings) and are only parsed when a document is built. That keeps a
//! malformed timestamp a validation failure of the export, not a failure to
//! load the record.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::timestamp::parse_instant;

/// A calendar event as stored by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_all_day: bool,
    /// Display timezone, e.g. "America/Chicago". Not used for export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: impl Into<String>,
        created_at: impl Into<String>,
        updated_at: impl Into<String>,
    ) -> Self {
        Event {
            id: id.into(),
            title: title.into(),
            description: None,
            location: None,
            start_date: Some(start_date.into()),
            end_date: None,
            is_all_day: false,
            timezone: None,
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }

    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn all_day(mut self) -> Self {
        self.is_all_day = true;
        self
    }

    /// Parsed start instant. Missing or unparseable values are rejected.
    pub fn start(&self) -> ExportResult<DateTime<FixedOffset>> {
        match self.start_date.as_deref() {
            Some(raw) => parse_instant("start_date", raw),
            None => Err(ExportError::validation("start_date", "missing")),
        }
    }

    /// Parsed end instant, if the event has one.
    pub fn end(&self) -> ExportResult<Option<DateTime<FixedOffset>>> {
        self.end_date
            .as_deref()
            .map(|raw| parse_instant("end_date", raw))
            .transpose()
    }

    pub fn created(&self) -> ExportResult<DateTime<FixedOffset>> {
        parse_instant("created_at", &self.created_at)
    }

    pub fn updated(&self) -> ExportResult<DateTime<FixedOffset>> {
        parse_instant("updated_at", &self.updated_at)
    }
}
