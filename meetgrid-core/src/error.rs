//! Error types for meetgrid.

use thiserror::Error;

/// Errors that can occur outside the pure classification and layout paths.
#[derive(Error, Debug)]
pub enum MeetgridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid hour range {first}..={last}: expected first <= last <= 23")]
    InvalidHourRange { first: u32, last: u32 },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MeetgridError {
    fn from(e: serde_json::Error) -> Self {
        MeetgridError::Serialization(e.to_string())
    }
}

/// Result type alias for meetgrid operations.
pub type MeetgridResult<T> = Result<T, MeetgridError>;
