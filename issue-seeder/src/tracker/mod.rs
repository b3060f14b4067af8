//! Issue tracker abstraction.
//!
//! [`IssueTracker`] is the seam between the submission runner and the remote
//! API, so the runner can be driven by [`GitHubTracker`] or by a test double.

mod error;
mod github;
mod repo;

pub use error::TrackerError;
pub use github::GitHubTracker;
pub use repo::{ParseRepoSlugError, RepoSlug};

use crate::catalog::IssueRecord;
use async_trait::async_trait;
use serde::Deserialize;

/// An issue as returned by the server after creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    /// Server-assigned issue number.
    pub number: u64,
    /// Title as stored by the server.
    pub title: String,
    /// Web URL of the issue.
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Remote issue tracker operations.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Read-only request proving the credential can see the target repository.
    async fn check_access(&self) -> Result<(), TrackerError>;

    /// Creates one issue. Only a `201 Created` response counts as success.
    async fn create_issue(&self, record: &IssueRecord) -> Result<CreatedIssue, TrackerError>;
}
