//! CLI for issue-seeder.
//!
//! Creates the issues declared in a TOML catalog in a GitHub repository, one
//! request at a time with a fixed pause in between.

mod progress;
mod style;

use clap::Parser;
use issue_seeder::{
    load_catalog, resolve_token, Catalog, CatalogError, CredentialHelper, GitHubTracker,
    RepoSlug, RunSummary, Runner, RunnerConfig, RunnerError, TrackerError, TOKEN_ENV_VAR,
};
use progress::CliProgress;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use style::{cross, Stylize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Seeder - Create the issues of a TOML catalog in a GitHub repository.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the issue catalog.
    #[arg(long, default_value = "catalog/roadmap.toml")]
    catalog: PathBuf,

    /// Target repository as `owner/name`. Overrides the catalog's `repository`.
    #[arg(long, env = "ISSUE_SEEDER_REPO")]
    repo: Option<RepoSlug>,

    /// GitHub API base URL (for GitHub Enterprise).
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Pause between two submissions, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Connect and read timeout for API requests, in seconds. Unbounded when unset.
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Command printing a token, used when GITHUB_TOKEN is unset.
    #[arg(long, default_value = "gh auth token")]
    credential_helper: String,

    /// Never run the credential helper.
    #[arg(long)]
    no_credential_helper: bool,

    /// Preview the catalog without creating issues.
    #[arg(long)]
    dry_run: bool,
}

/// Fatal conditions, each reported once and mapped to exit code 1.
#[derive(Debug)]
enum Failure {
    Catalog(CatalogError),
    MissingRepository,
    MissingCredential,
    Client(TrackerError),
    Runner(RunnerError),
}

impl Failure {
    fn report(&self) {
        match self {
            Self::Catalog(e) => eprintln!("{} Failed to load catalog: {}", cross(), e.error()),
            Self::MissingRepository => {
                eprintln!(
                    "{} No target repository: pass --repo owner/name or set `repository` in the catalog",
                    cross()
                );
            }
            Self::MissingCredential => print_credential_help(),
            Self::Client(e) => {
                eprintln!("{} Failed to build GitHub client: {}", cross(), e.error());
            }
            Self::Runner(RunnerError::AuthenticationRejected { status, body }) => {
                eprintln!("{} Authentication failed: {}", cross(), status.error());
                eprintln!("Response: {body}");
            }
            Self::Runner(e) => {
                eprintln!("{} Authentication check failed: {}", cross(), e.error());
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) if summary.has_failures() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(failure) => {
            failure.report();
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing on stderr, filtered by `RUST_LOG` (default "info").
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn run(args: Args) -> Result<RunSummary, Failure> {
    let catalog = load_catalog(&args.catalog).map_err(Failure::Catalog)?;

    let repo = args
        .repo
        .clone()
        .or_else(|| catalog.repository().cloned())
        .ok_or(Failure::MissingRepository)?;

    if args.dry_run {
        print_dry_run_preview(&catalog, &repo);
        return Ok(RunSummary::new());
    }

    let helper = if args.no_credential_helper {
        None
    } else {
        CredentialHelper::parse(&args.credential_helper)
    };
    let token = resolve_token(helper.as_ref())
        .await
        .ok_or(Failure::MissingCredential)?;

    let tracker = GitHubTracker::new(
        &token.token,
        repo.clone(),
        args.api_url.as_deref(),
        args.request_timeout_secs.map(Duration::from_secs),
    )
    .map_err(Failure::Client)?;

    let config = RunnerConfig::new().with_delay(Duration::from_millis(args.delay_ms));
    let runner = Runner::new(config, Box::new(tracker));

    println!("Testing GitHub authentication...");
    let progress = CliProgress::new(repo);
    runner.run(&catalog, &progress).await.map_err(Failure::Runner)
}

fn print_dry_run_preview(catalog: &Catalog, repo: &RepoSlug) {
    println!(
        "[DRY RUN] Would create {} issues in {}\n",
        catalog.len().accent(),
        repo.accent()
    );

    for (i, issue) in catalog.issues().iter().enumerate() {
        let labels = if issue.labels.is_empty() {
            String::new()
        } else {
            format!(" [{}]", issue.labels.join(", "))
        };
        println!(
            "  [{}/{}] {}{}",
            i + 1,
            catalog.len(),
            issue.title,
            labels.muted()
        );
    }
}

fn print_credential_help() {
    let rule = "=".repeat(70);
    eprintln!("{rule}");
    eprintln!("{}", "GITHUB TOKEN REQUIRED".emphasis());
    eprintln!("{rule}");
    eprintln!();
    eprintln!("A GitHub personal access token is needed to create issues.");
    eprintln!();
    eprintln!("Please:");
    eprintln!("1. Go to: https://github.com/settings/tokens/new");
    eprintln!("2. Create a token with 'repo' scope");
    eprintln!("3. Run: export {TOKEN_ENV_VAR}='your_token_here'");
    eprintln!("   (or sign in to the GitHub CLI with: gh auth login)");
    eprintln!("4. Run this command again");
    eprintln!();
}
