//! Reading generated documents back, for verification.
//!
//! This is not an event importer. It exposes the VEVENT property lists of a
//! document so exported output can be checked against its source.

use icalendar::parser::{Component, read_calendar, unfold};

use super::escape::unescape_text;
use crate::error::{ExportError, ExportResult};

/// One property line of a VEVENT, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProperty {
    pub name: String,
    pub params: Vec<(String, Option<String>)>,
    pub value: String,
}

/// The properties of one VEVENT, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub properties: Vec<ParsedProperty>,
}

impl ParsedEvent {
    fn from_component(component: &Component<'_>) -> Self {
        let properties = component
            .properties
            .iter()
            .map(|p| ParsedProperty {
                name: p.name.to_string(),
                params: p
                    .params
                    .iter()
                    .map(|param| (param.key.to_string(), param.val.as_ref().map(|v| v.to_string())))
                    .collect(),
                value: p.val.to_string(),
            })
            .collect();

        ParsedEvent { properties }
    }

    fn find(&self, name: &str) -> Option<&ParsedProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Unescaped TEXT value of the first property called `name`.
    pub fn value(&self, name: &str) -> Option<String> {
        self.find(name).map(|p| unescape_text(&p.value))
    }

    /// Value of parameter `key` on the first property called `name`.
    pub fn param(&self, name: &str, key: &str) -> Option<String> {
        self.find(name)?
            .params
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.clone())
    }

    /// Property names in document order.
    pub fn names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Parse a document and return its VEVENTs in order.
pub fn read_events(document: &str) -> ExportResult<Vec<ParsedEvent>> {
    let unfolded = unfold(document);
    let calendar = read_calendar(&unfolded).map_err(|e| ExportError::Parse(e.to_string()))?;

    Ok(calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(ParsedEvent::from_component)
        .collect())
}
