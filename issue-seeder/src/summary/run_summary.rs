//! Run summary types.

use super::result::{Outcome, SubmissionResult};

/// Tally of a complete submission run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of issues created.
    pub created: usize,

    /// Number of issues that failed to create.
    pub failed: usize,

    /// Number of submissions attempted.
    pub total: usize,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the summary with a submission result.
    pub fn record_result(&mut self, result: &SubmissionResult<'_>) {
        match result.outcome {
            Outcome::Created(_) => self.created += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
        self.total += 1;
    }

    /// Returns true if any submission failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns true if every attempted submission created an issue.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.failed == 0 && self.created == self.total
    }
}
