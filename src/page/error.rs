use thiserror::Error;

use crate::database::DatabaseError;

/// Failures of the page composition engine.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("A page with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Invalid section type '{0}'")]
    InvalidSectionType(String),

    #[error("Invalid section settings: {0}")]
    InvalidSectionSettings(String),

    #[error("Invalid {field}: {message}")]
    InvalidPage { field: &'static str, message: String },

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Unknown section ids in reorder: {}", .0.join(", "))]
    UnknownSectionIds(Vec<String>),

    #[error("Page was modified concurrently (expected revision {expected}, current {current})")]
    Conflict { expected: i64, current: i64 },

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl PageError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        PageError::InvalidPage {
            field,
            message: message.into(),
        }
    }
}
