#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod auth;
pub mod catalog;
pub mod rate_limit;
pub mod runner;
pub mod summary;
pub mod tracker;

pub use auth::{
    resolve_token, resolve_token_with, token_from_env, CredentialHelper, ResolvedToken,
    TokenSource, TOKEN_ENV_VAR,
};
pub use catalog::{load_catalog, Catalog, CatalogError, IssueRecord};
pub use rate_limit::{flag_ignored_signal, RateLimitInfo};
pub use runner::{
    submit_all, NoopProgress, Runner, RunnerConfig, RunnerError, SubmitProgress,
};
pub use summary::{Outcome, RunSummary, SubmissionResult};
pub use tracker::{
    CreatedIssue, GitHubTracker, IssueTracker, ParseRepoSlugError, RepoSlug, TrackerError,
};
