//! Issue record definition.

use serde::{Deserialize, Serialize};

/// One issue to create in the target repository.
///
/// Serializes directly to the JSON payload of the issues endpoint:
/// `{title, body, labels, milestone}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssueRecord {
    /// Issue title. Must not be blank.
    pub title: String,

    /// Markdown body, passed through verbatim.
    #[serde(default)]
    pub body: String,

    /// Label names in declaration order.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Milestone number. Sent as `null` when absent.
    #[serde(default)]
    pub milestone: Option<u64>,
}

impl IssueRecord {
    /// Creates a record with no labels and no milestone.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            labels: Vec::new(),
            milestone: None,
        }
    }

    /// Sets the labels of this record.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("issue title is empty".to_string());
        }
        Ok(())
    }
}
