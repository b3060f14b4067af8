//! Tracker error types.

use thiserror::Error;

/// Errors that can occur while talking to the issue tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The server answered with an unexpected status.
    #[error("HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request could not be completed or the response was unreadable.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The GitHub client could not be built.
    #[error("GitHub client error: {0}")]
    Client(#[from] octocrab::Error),
}

impl TrackerError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
