//! CLI for the Gerrit mirror.
//!
//! Mirrors open Gerrit changes as GitHub pull requests and relays CI results
//! back to Gerrit, either once (`--cron`) or on a fixed interval.

use clap::Parser;
use gerrit_mirror::{
    CycleSummary, GerritAuth, MirrorCredential, Runner, Schedule, SyncConfig, SyncSettings,
    DEFAULT_MIRROR_GIT_URL,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Gerrit mirror - Push open Gerrit changes to GitHub and relay CI results back.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Gerrit base URL.
    #[arg(
        long,
        env = "GITSYNC_GERRIT",
        default_value = "https://upspin-review.googlesource.com"
    )]
    gerrit: String,

    /// GitHub account owning the mirror repositories.
    #[arg(long, env = "GITSYNC_GITHUB", default_value = "AugieBot")]
    github: String,

    /// GitHub API base URL, for GitHub Enterprise.
    #[arg(long, env = "GITSYNC_GITHUB_API")]
    github_api: Option<String>,

    /// Git host the mirror branches are pushed to.
    #[arg(long, default_value = DEFAULT_MIRROR_GIT_URL)]
    mirror_git: String,

    /// Seconds between cycles.
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u64).range(1..))]
    poll: u64,

    /// Directory for working copies. A temporary directory is used if unset.
    #[arg(long, env = "GITSYNC_DIR")]
    dir: Option<PathBuf>,

    /// Run a single cycle and exit.
    #[arg(long)]
    cron: bool,

    /// Log planned actions without touching GitHub, Gerrit or git.
    #[arg(long)]
    dry_run: bool,

    /// Path to the settings file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    init_tracing();

    let args = Args::parse();

    let config = match build_config(args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let runner = match Runner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            error!(error = %e, "Failed to initialize");
            return ExitCode::from(2);
        }
    };

    match runner.run().await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Cycle failed");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Log level comes from `RUST_LOG`, defaulting to `info`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Resolves credentials and settings into a runner configuration.
fn build_config(args: Args) -> Result<SyncConfig, String> {
    let credential = MirrorCredential::from_env().map_err(|e| e.to_string())?;
    let gerrit_auth = GerritAuth::from_env().map_err(|e| e.to_string())?;
    let settings = match &args.config {
        Some(path) => SyncSettings::load(path).map_err(|e| e.to_string())?,
        None => SyncSettings::default(),
    };
    let schedule = if args.cron {
        Schedule::Once
    } else {
        Schedule::Every(Duration::from_secs(args.poll))
    };

    Ok(
        SyncConfig::new(&args.gerrit, &args.github, credential, schedule)
            .with_gerrit_auth(gerrit_auth)
            .with_github_api(args.github_api)
            .with_mirror_git_url(&args.mirror_git)
            .with_work_dir(args.dir.filter(|dir| !dir.as_os_str().is_empty()))
            .with_dry_run(args.dry_run)
            .with_settings(settings),
    )
}

/// Prints the summary of a single-shot run.
fn print_summary(summary: &CycleSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Open changes: {}", summary.changes_fetched);
    println!("  Mirror pull requests: {}", summary.pull_requests_fetched);
    println!("  Created: {}", summary.created);
    println!("  Updated: {}", summary.updated);
    println!("  Closed: {}", summary.closed);
    println!("  Unchanged: {}", summary.unchanged);
    println!("  Comments posted: {}", summary.comments_posted);
}
