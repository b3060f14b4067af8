//! Rate limit signals from GitHub responses.
//!
//! Submissions are paced by a fixed delay only. The signals parsed here are
//! logged so an exhausted quota is visible, but nothing waits or retries on
//! them.

use http::HeaderMap;
use tracing::warn;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const LIMIT_HEADER: &str = "x-ratelimit-limit";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit information for the core API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Reads the `x-ratelimit-*` headers. Returns `None` if `remaining` is absent.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        fn header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
            headers.get(name)?.to_str().ok()?.trim().parse().ok()
        }

        Some(Self {
            remaining: header(headers, REMAINING_HEADER)?,
            reset: header(headers, RESET_HEADER).unwrap_or_default(),
            limit: header(headers, LIMIT_HEADER).unwrap_or_default(),
        })
    }

    /// Returns true once the window is used up.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Logs a warning when a response says the client is being rate limited.
///
/// Returns true if a signal was found (status 429, or no requests remaining).
pub fn flag_ignored_signal(status: u16, headers: &HeaderMap) -> bool {
    let info = RateLimitInfo::from_headers(headers);
    let exhausted = info.as_ref().is_some_and(RateLimitInfo::is_exhausted);

    if status != 429 && !exhausted {
        return false;
    }

    warn!(
        status,
        remaining = info.as_ref().map(|i| i.remaining),
        reset = info.as_ref().map(|i| i.reset),
        "Rate limit signal received; pacing uses a fixed delay and ignores it"
    );
    true
}
