//! Console progress for a submission run.

use crate::style::{check, cross, Stylize};
use issue_seeder::{
    Outcome, RepoSlug, RunSummary, SubmissionResult, SubmitProgress, TrackerError,
};

/// Width of the summary block delimiters.
const RULE_WIDTH: usize = 60;

/// Prints one line per record and a final summary block to stdout.
pub struct CliProgress {
    repo: RepoSlug,
}

impl CliProgress {
    pub fn new(repo: RepoSlug) -> Self {
        Self { repo }
    }
}

impl SubmitProgress for CliProgress {
    fn on_authenticated(&self) {
        println!("{} Authentication successful!", check());
        println!();
    }

    fn on_start(&self, total: usize) {
        println!(
            "Creating {} issues for {}...",
            total.accent(),
            self.repo.accent()
        );
        println!();
    }

    fn on_result(&self, position: usize, total: usize, result: &SubmissionResult<'_>) {
        let prefix = format!("[{position}/{total}]");
        let title = &result.record.title;

        match &result.outcome {
            Outcome::Created(issue) => {
                let number = format!("#{}", issue.number);
                println!(
                    "{prefix} {} Created issue {}: {}",
                    check(),
                    number.accent(),
                    issue.title
                );
            }
            Outcome::Failed(TrackerError::Rejected { status, body }) => {
                println!(
                    "{prefix} {} Failed to create issue: {title}",
                    cross().for_stdout()
                );
                println!("  Status: {}", status.error().for_stdout());
                println!("  Response: {}", body.muted());
            }
            Outcome::Failed(e) => {
                println!(
                    "{prefix} {} Error creating issue: {title}",
                    cross().for_stdout()
                );
                println!("  Error: {}", e.error().for_stdout());
            }
        }
    }

    fn on_complete(&self, summary: &RunSummary) {
        let rule = "=".repeat(RULE_WIDTH);
        println!();
        println!("{rule}");
        println!("{}", "Summary:".emphasis());
        println!("  Created: {}", summary.created);
        println!("  Failed: {}", summary.failed);
        println!("  Total: {}", summary.total);
        println!("{rule}");
    }
}
