//! Runner configuration.

use std::time::Duration;

/// Fixed pause between two consecutive submissions.
pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_secs(1);

/// Configuration for a submission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Pause after every submission except the last.
    delay: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SUBMISSION_DELAY,
        }
    }
}

impl RunnerConfig {
    /// Creates a configuration with the default one second delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delay between submissions.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the delay between submissions.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
