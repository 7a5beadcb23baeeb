//! Error types for the timetable.

use thiserror::Error;

/// Errors that can occur in timetable operations.
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored data has version {found}, newest supported is {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("A class with id {0} already exists")]
    DuplicateClass(uuid::Uuid),

    #[error("Notification error: {0}")]
    Notification(String),
}

/// Result type alias for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;
