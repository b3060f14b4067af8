//! GitHub issue tracker backed by octocrab.
//!
//! Uses octocrab's raw request methods so the exact status code and response
//! body of every call stay visible to the caller.

use crate::catalog::IssueRecord;
use crate::rate_limit::flag_ignored_signal;
use crate::tracker::{CreatedIssue, IssueTracker, RepoSlug, TrackerError};
use async_trait::async_trait;
use http::StatusCode;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use std::time::Duration;
use tracing::{debug, info_span, Instrument};

/// GitHub tracker for a single repository.
pub struct GitHubTracker {
    client: Octocrab,
    repo: RepoSlug,
}

impl GitHubTracker {
    /// Builds a tracker authenticated with `token`.
    ///
    /// `api_url` overrides `https://api.github.com` (GitHub Enterprise, tests).
    /// `timeout` applies to connect and read; `None` leaves requests unbounded.
    /// Octocrab's retry layer is disabled: every request is sent exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Client`] if the base URL is invalid or the
    /// client can't be built.
    pub fn new(
        token: &str,
        repo: RepoSlug,
        api_url: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, TrackerError> {
        install_crypto_provider();

        let mut builder = Octocrab::builder()
            .personal_token(token.to_string())
            .add_retry_config(RetryConfig::None);

        if let Some(url) = api_url {
            builder = builder.base_uri(url)?;
        }

        if timeout.is_some() {
            builder = builder
                .set_connect_timeout(timeout)
                .set_read_timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            repo,
        })
    }

    fn repo_route(&self) -> String {
        format!("/repos/{}/{}", self.repo.owner(), self.repo.name())
    }
}

/// Installs aws-lc-rs as the process-wide rustls provider. Later calls are no-ops.
fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

fn transport(error: octocrab::Error) -> TrackerError {
    TrackerError::Transport(error.to_string())
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn check_access(&self) -> Result<(), TrackerError> {
        let route = self.repo_route();
        debug!(route = %route, "Checking repository access");

        let response = self.client._get(route).await.map_err(transport)?;
        let status = response.status();
        flag_ignored_signal(status.as_u16(), response.headers());

        if status.is_success() {
            return Ok(());
        }

        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(transport)?;
        Err(TrackerError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    async fn create_issue(&self, record: &IssueRecord) -> Result<CreatedIssue, TrackerError> {
        let span = info_span!("create_issue", repo = %self.repo, title = %record.title);

        async {
            let route = format!("{}/issues", self.repo_route());
            let response = self
                .client
                ._post(route, Some(record))
                .await
                .map_err(transport)?;

            let status = response.status();
            flag_ignored_signal(status.as_u16(), response.headers());

            let body = self
                .client
                .body_to_string(response)
                .await
                .map_err(transport)?;

            if status != StatusCode::CREATED {
                debug!(status = status.as_u16(), "Issue rejected");
                return Err(TrackerError::Rejected {
                    status: status.as_u16(),
                    body,
                });
            }

            let issue: CreatedIssue = serde_json::from_str(&body)
                .map_err(|e| TrackerError::Transport(format!("malformed response: {e}")))?;
            debug!(issue_number = issue.number, "Issue created");
            Ok(issue)
        }
        .instrument(span)
        .await
    }
}
