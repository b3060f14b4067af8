//! Progress callback trait for interface-agnostic updates.

use crate::summary::{RunSummary, SubmissionResult};

/// Receives updates while a run progresses.
pub trait SubmitProgress: Send + Sync {
    /// Called once the access check passed.
    fn on_authenticated(&self) {}

    /// Called before the first submission.
    fn on_start(&self, total: usize);

    /// Called after each submission. `position` is 1-based.
    fn on_result(&self, position: usize, total: usize, result: &SubmissionResult<'_>);

    /// Called after the catalog is exhausted.
    fn on_complete(&self, summary: &RunSummary);
}

/// No-op progress for tests or when output isn't needed.
pub struct NoopProgress;

impl SubmitProgress for NoopProgress {
    fn on_start(&self, _total: usize) {}
    fn on_result(&self, _position: usize, _total: usize, _result: &SubmissionResult<'_>) {}
    fn on_complete(&self, _summary: &RunSummary) {}
}
