//! Per-record submission results.

use crate::catalog::IssueRecord;
use crate::tracker::{CreatedIssue, TrackerError};

/// Terminal state of one submission attempt.
#[derive(Debug)]
pub enum Outcome {
    /// The server created the issue.
    Created(CreatedIssue),

    /// The server rejected the request or it never completed.
    Failed(TrackerError),
}

/// Result of submitting a single catalog record.
#[derive(Debug)]
pub struct SubmissionResult<'a> {
    /// The record that was submitted.
    pub record: &'a IssueRecord,

    /// What happened to it.
    pub outcome: Outcome,
}

impl SubmissionResult<'_> {
    /// Returns true if the issue was created.
    pub fn is_created(&self) -> bool {
        matches!(self.outcome, Outcome::Created(_))
    }

    /// Server-assigned issue reference on success, raw diagnostic on failure.
    pub fn detail(&self) -> String {
        match &self.outcome {
            Outcome::Created(issue) => format!("#{}", issue.number),
            Outcome::Failed(error) => error.to_string(),
        }
    }
}
