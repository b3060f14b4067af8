//! External credential helper invocation.

use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// How long a credential helper may run before it is abandoned.
pub const DEFAULT_HELPER_TIMEOUT: Duration = Duration::from_secs(5);

/// An external command that prints a token to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHelper {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CredentialHelper {
    /// Creates a helper running `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: DEFAULT_HELPER_TIMEOUT,
        }
    }

    /// The GitHub CLI: `gh auth token`.
    pub fn gh() -> Self {
        Self::new("gh", ["auth", "token"])
    }

    /// Parses a whitespace-separated command line such as `"gh auth token"`.
    ///
    /// Returns `None` for a blank command line.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }

    /// Overrides the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the helper and returns its trimmed stdout.
    ///
    /// A missing executable, a timeout, a non-zero exit status or empty output
    /// all yield `None`. The child is killed if it outlives the timeout.
    pub async fn fetch_token(&self) -> Option<String> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                debug!(program = %self.program, error = %e, "Credential helper unavailable");
                return None;
            }
            Err(_) => {
                debug!(
                    program = %self.program,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Credential helper timed out"
                );
                return None;
            }
        };

        if !output.status.success() {
            debug!(program = %self.program, status = %output.status, "Credential helper failed");
            return None;
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_line() {
        let helper = CredentialHelper::parse("  gh auth   token ").unwrap();

        assert_eq!(helper, CredentialHelper::gh());
        assert_eq!(helper.timeout(), DEFAULT_HELPER_TIMEOUT);
        assert!(CredentialHelper::parse("   ").is_none());
    }

    #[tokio::test]
    async fn missing_program_yields_none() {
        let helper = CredentialHelper::new("issue-seeder-no-such-helper", Vec::<String>::new());

        assert_eq!(helper.fetch_token().await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn trims_helper_output() {
        let helper = CredentialHelper::new("sh", ["-c", "printf '  tok-123 \\n'"]);

        assert_eq!(helper.fetch_token().await.as_deref(), Some("tok-123"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_helper_yields_none() {
        let helper = CredentialHelper::new("sh", ["-c", "echo tok-123; exit 1"]);

        assert_eq!(helper.fetch_token().await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn empty_output_yields_none() {
        let helper = CredentialHelper::new("sh", ["-c", "echo '   '"]);

        assert_eq!(helper.fetch_token().await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_helper_times_out() {
        let helper =
            CredentialHelper::new("sleep", ["10"]).with_timeout(Duration::from_millis(100));

        let started = std::time::Instant::now();
        assert_eq!(helper.fetch_token().await, None);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
