//! Token resolution.
//!
//! Priority:
//! 1. `GITHUB_TOKEN` environment variable
//! 2. A credential helper (by default `gh auth token`)

mod helper;

pub use helper::{CredentialHelper, DEFAULT_HELPER_TIMEOUT};

use std::env;
use std::fmt;
use tracing::{debug, info};

/// Environment variable holding the bearer token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Where a token was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token from the environment variable.
    EnvVar,
    /// Token printed by the credential helper.
    CredentialHelper,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVar => write!(f, "{TOKEN_ENV_VAR}"),
            Self::CredentialHelper => write!(f, "credential helper"),
        }
    }
}

/// A resolved bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    /// The token itself.
    pub token: String,
    /// Where the token came from.
    pub source: TokenSource,
}

impl fmt::Debug for ResolvedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedToken")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Reads the token from [`TOKEN_ENV_VAR`], trimmed.
///
/// A value made only of whitespace counts as unset, so the credential helper
/// still gets a chance to supply a token.
pub fn token_from_env() -> Option<String> {
    env::var(TOKEN_ENV_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Resolves a token from the environment, then from `helper`.
///
/// Returns `None` when neither yields a value. Helper failures are not errors.
pub async fn resolve_token(helper: Option<&CredentialHelper>) -> Option<ResolvedToken> {
    resolve_token_with(token_from_env(), helper).await
}

/// Same as [`resolve_token`] with the environment value supplied by the caller.
pub async fn resolve_token_with(
    env_token: Option<String>,
    helper: Option<&CredentialHelper>,
) -> Option<ResolvedToken> {
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        info!(source = %TokenSource::EnvVar, "Using token");
        return Some(ResolvedToken {
            token: token.trim().to_string(),
            source: TokenSource::EnvVar,
        });
    }

    let Some(helper) = helper else {
        debug!("No credential helper configured");
        return None;
    };

    let token = helper.fetch_token().await?;
    info!(source = %TokenSource::CredentialHelper, program = helper.program(), "Using token");
    Some(ResolvedToken {
        token,
        source: TokenSource::CredentialHelper,
    })
}
