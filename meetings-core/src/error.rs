//! Error types for the meetings client.

use thiserror::Error;

/// Errors that can occur while talking to the meetings backend or
/// preparing a request for it.
#[derive(Error, Debug)]
pub enum MeetingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Could not reach the meetings server: {0}")]
    Transport(String),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response from server: {0}")]
    MalformedResponse(String),

    #[error("Invalid meeting: {0}")]
    InvalidDraft(String),

    #[error("Meeting not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for MeetingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MeetingError::MalformedResponse(err.to_string())
        } else {
            MeetingError::Transport(err.to_string())
        }
    }
}

/// Result type alias for meetings operations.
pub type MeetingResult<T> = Result<T, MeetingError>;
