//! Error types for calendar export.

use thiserror::Error;

/// Errors that can occur while building or delivering a calendar document.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid value for '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Event #{index} ('{id}') cannot be exported: {source}")]
    InvalidBatchEvent {
        index: usize,
        id: String,
        #[source]
        source: Box<ExportError>,
    },

    #[error("Refusing to deliver an empty calendar document")]
    EmptyDocument,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ICS parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExportError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        ExportError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for malformed-input errors, including a bad event inside a batch.
    pub fn is_validation(&self) -> bool {
        match self {
            ExportError::Validation { .. } => true,
            ExportError::InvalidBatchEvent { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
