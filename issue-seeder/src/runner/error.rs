//! Runner error types.

use crate::tracker::TrackerError;

/// Fatal errors that stop a run before any issue is submitted.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The access check returned a non-success status.
    #[error("Authentication failed: {status}\nResponse: {body}")]
    AuthenticationRejected { status: u16, body: String },

    /// The access check could not be completed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
