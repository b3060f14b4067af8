//! Sequential submission of a catalog.

mod config;
mod error;
mod progress;

pub use config::{RunnerConfig, DEFAULT_SUBMISSION_DELAY};
pub use error::RunnerError;
pub use progress::{NoopProgress, SubmitProgress};

use crate::catalog::Catalog;
use crate::summary::{Outcome, RunSummary, SubmissionResult};
use crate::tracker::{IssueTracker, TrackerError};
use tracing::{debug, error, info};

/// Checks access, then submits a catalog.
pub struct Runner {
    config: RunnerConfig,
    tracker: Box<dyn IssueTracker>,
}

impl Runner {
    /// Builds a runner around a tracker.
    pub fn new(config: RunnerConfig, tracker: Box<dyn IssueTracker>) -> Self {
        Self { config, tracker }
    }

    /// Verifies the credential against the target repository.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::AuthenticationRejected`] on a non-success status
    /// and [`RunnerError::Tracker`] if the request itself fails.
    pub async fn check_access(&self) -> Result<(), RunnerError> {
        info!("Checking authentication");
        match self.tracker.check_access().await {
            Ok(()) => Ok(()),
            Err(TrackerError::Rejected { status, body }) => {
                error!(status, "Authentication rejected");
                Err(RunnerError::AuthenticationRejected { status, body })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Runs the access check and, if it passes, submits the whole catalog.
    ///
    /// # Errors
    ///
    /// Only the access check is fatal; submission failures are counted in the
    /// returned [`RunSummary`].
    pub async fn run(
        &self,
        catalog: &Catalog,
        progress: &dyn SubmitProgress,
    ) -> Result<RunSummary, RunnerError> {
        self.check_access().await?;
        progress.on_authenticated();
        Ok(submit_all(self.tracker.as_ref(), catalog, &self.config, progress).await)
    }
}

/// Submits every record in catalog order, one at a time.
///
/// A failed record is counted and the run moves on to the next one. The
/// configured delay is slept after every submission except the last.
pub async fn submit_all(
    tracker: &dyn IssueTracker,
    catalog: &Catalog,
    config: &RunnerConfig,
    progress: &dyn SubmitProgress,
) -> RunSummary {
    let total = catalog.len();
    let mut summary = RunSummary::new();

    info!(
        total,
        delay_ms = config.delay().as_millis() as u64,
        "Submitting catalog"
    );
    progress.on_start(total);

    for (index, record) in catalog.issues().iter().enumerate() {
        let position = index + 1;

        let outcome = match tracker.create_issue(record).await {
            Ok(issue) => {
                debug!(
                    position,
                    total,
                    issue_number = issue.number,
                    title = %record.title,
                    "Created issue"
                );
                Outcome::Created(issue)
            }
            Err(e) => {
                error!(
                    position,
                    total,
                    title = %record.title,
                    error = %e,
                    "Failed to create issue"
                );
                Outcome::Failed(e)
            }
        };

        let result = SubmissionResult { record, outcome };
        summary.record_result(&result);
        progress.on_result(position, total, &result);

        if position < total {
            tokio::time::sleep(config.delay()).await;
        }
    }

    info!(
        created = summary.created,
        failed = summary.failed,
        total = summary.total,
        "Submission finished"
    );
    progress.on_complete(&summary);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IssueRecord;
    use crate::tracker::CreatedIssue;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Failure injected for a given title.
    enum Injected {
        Status(u16),
        Transport,
    }

    /// Recording tracker with per-title failure injection.
    struct MockTracker {
        next_number: AtomicU64,
        access: Option<u16>,
        failures: HashMap<String, Injected>,
        calls: Mutex<Vec<(String, Instant)>>,
    }

    impl MockTracker {
        fn new() -> Self {
            Self {
                next_number: AtomicU64::new(1),
                access: None,
                failures: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn reject_access(mut self, status: u16) -> Self {
            self.access = Some(status);
            self
        }

        fn fail(mut self, title: &str, failure: Injected) -> Self {
            self.failures.insert(title.to_string(), failure);
            self
        }

        fn titles(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(title, _)| title.clone())
                .collect()
        }

        fn instants(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
        }
    }

    #[async_trait]
    impl IssueTracker for MockTracker {
        async fn check_access(&self) -> Result<(), TrackerError> {
            match self.access {
                Some(status) => Err(TrackerError::Rejected {
                    status,
                    body: "{\"message\":\"Bad credentials\"}".to_string(),
                }),
                None => Ok(()),
            }
        }

        async fn create_issue(&self, record: &IssueRecord) -> Result<CreatedIssue, TrackerError> {
            self.calls
                .lock()
                .unwrap()
                .push((record.title.clone(), Instant::now()));

            match self.failures.get(&record.title) {
                Some(Injected::Status(status)) => Err(TrackerError::Rejected {
                    status: *status,
                    body: "{\"message\":\"Validation Failed\"}".to_string(),
                }),
                Some(Injected::Transport) => {
                    Err(TrackerError::Transport("connection refused".to_string()))
                }
                None => Ok(CreatedIssue {
                    number: self.next_number.fetch_add(1, Ordering::SeqCst),
                    title: record.title.clone(),
                    html_url: None,
                }),
            }
        }
    }

    /// Progress that keeps every line it would print.
    #[derive(Default)]
    struct RecordingProgress {
        lines: Mutex<Vec<String>>,
        authenticated: Mutex<bool>,
    }

    impl SubmitProgress for RecordingProgress {
        fn on_authenticated(&self) {
            *self.authenticated.lock().unwrap() = true;
        }

        fn on_start(&self, total: usize) {
            self.lines.lock().unwrap().push(format!("start {total}"));
        }

        fn on_result(&self, position: usize, total: usize, result: &SubmissionResult<'_>) {
            self.lines.lock().unwrap().push(format!(
                "[{position}/{total}] {} {}",
                result.record.title,
                result.detail()
            ));
        }

        fn on_complete(&self, summary: &RunSummary) {
            self.lines.lock().unwrap().push(format!(
                "done {}/{}/{}",
                summary.created, summary.failed, summary.total
            ));
        }
    }

    fn catalog(titles: &[&str]) -> Catalog {
        Catalog::new(
            None,
            titles.iter().map(|t| IssueRecord::new(*t, "body")).collect(),
        )
    }

    fn no_delay() -> RunnerConfig {
        RunnerConfig::new().with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn creates_every_record_in_order() {
        let tracker = MockTracker::new();
        let catalog = catalog(&["A", "B", "C", "D"]);

        let summary = submit_all(&tracker, &catalog, &no_delay(), &NoopProgress).await;

        assert_eq!(
            summary,
            RunSummary {
                created: 4,
                failed: 0,
                total: 4,
            }
        );
        assert!(summary.all_success());
        assert_eq!(tracker.titles(), vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn rejected_record_is_counted_and_run_continues() {
        let tracker = MockTracker::new().fail("B", Injected::Status(422));
        let progress = RecordingProgress::default();
        let catalog = catalog(&["A", "B", "C"]);

        let summary = submit_all(&tracker, &catalog, &no_delay(), &progress).await;

        assert_eq!(
            summary,
            RunSummary {
                created: 2,
                failed: 1,
                total: 3,
            }
        );
        assert!(summary.has_failures());
        assert_eq!(tracker.titles(), vec!["A", "B", "C"]);

        let lines = progress.lines.lock().unwrap().clone();
        assert_eq!(lines[0], "start 3");
        assert_eq!(lines[1], "[1/3] A #1");
        assert!(lines[2].starts_with("[2/3] B HTTP 422"));
        assert_eq!(lines[3], "[3/3] C #2");
        assert_eq!(lines[4], "done 2/1/3");
    }

    #[tokio::test]
    async fn transport_failure_does_not_stop_the_run() {
        let tracker = MockTracker::new()
            .fail("A", Injected::Transport)
            .fail("C", Injected::Transport);
        let catalog = catalog(&["A", "B", "C"]);

        let summary = submit_all(&tracker, &catalog, &no_delay(), &NoopProgress).await;

        assert_eq!(summary.created, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.created + summary.failed, summary.total);
        assert_eq!(tracker.titles(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn empty_catalog_makes_no_submissions() {
        let tracker = MockTracker::new();
        let progress = RecordingProgress::default();

        let summary = submit_all(&tracker, &Catalog::default(), &no_delay(), &progress).await;

        assert_eq!(summary, RunSummary::default());
        assert!(tracker.titles().is_empty());
        assert_eq!(
            progress.lines.lock().unwrap().clone(),
            vec!["start 0", "done 0/0/0"]
        );
    }

    #[tokio::test]
    async fn waits_between_submissions_but_not_after_the_last() {
        let delay = Duration::from_millis(40);
        let tracker = MockTracker::new();
        let catalog = catalog(&["A", "B", "C"]);
        let config = RunnerConfig::new().with_delay(delay);

        let started = Instant::now();
        submit_all(&tracker, &catalog, &config, &NoopProgress).await;
        let elapsed = started.elapsed();

        let instants = tracker.instants();
        for pair in instants.windows(2) {
            assert!(pair[1].duration_since(pair[0]) >= delay);
        }
        assert!(elapsed >= delay * 2);
        assert!(elapsed < delay * 2 + Duration::from_millis(900));
    }

    #[tokio::test]
    async fn rejected_access_stops_before_any_submission() {
        let runner = Runner::new(
            no_delay(),
            Box::new(MockTracker::new().reject_access(401)),
        );
        let progress = RecordingProgress::default();

        let result = runner.run(&catalog(&["A", "B"]), &progress).await;

        match result {
            Err(RunnerError::AuthenticationRejected { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Bad credentials"));
            }
            other => panic!("expected rejected authentication, got {other:?}"),
        }
        assert!(!*progress.authenticated.lock().unwrap());
        assert!(progress.lines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn run_submits_after_successful_access_check() {
        let tracker = MockTracker::new();
        let runner = Runner::new(no_delay(), Box::new(tracker));
        let progress = RecordingProgress::default();

        let summary = runner.run(&catalog(&["A"]), &progress).await.unwrap();

        assert_eq!(summary.created, 1);
        assert!(*progress.authenticated.lock().unwrap());
    }
}
