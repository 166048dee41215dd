//! `git` subprocess invocation.

use super::GitError;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::trace;
use url::Url;

/// Runs `git` with `args` in `dir`.
///
/// On failure the error carries the combined stdout and stderr, with any URL
/// password in the arguments replaced by `***`.
pub(crate) async fn run_git(dir: &Path, args: &[&str]) -> Result<(), GitError> {
    git_output(dir, args).await.map(|_| ())
}

/// Runs `git` with `args` in `dir` and returns its trimmed stdout.
///
/// Repository discovery stops at `dir`: git never picks up a repository in a
/// parent directory.
pub(crate) async fn git_output(dir: &Path, args: &[&str]) -> Result<String, GitError> {
    trace!(dir = %dir.display(), args = %redact_args(args), "Running git");

    let mut command = Command::new("git");
    command
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(parent) = dir.parent() {
        command.env("GIT_CEILING_DIRECTORIES", parent);
    }

    let output = command.output().await.map_err(|source| GitError::Spawn {
        args: redact_args(args),
        source,
    })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(GitError::Command {
            args: redact_args(args),
            output: combined,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Joins arguments for display, hiding URL passwords.
pub(crate) fn redact_args(args: &[&str]) -> String {
    args.iter()
        .map(|arg| redact_url(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn redact_url(arg: &str) -> String {
    match Url::parse(arg) {
        Ok(mut url) if url.password().is_some() => {
            // Only fails for URLs that cannot carry credentials.
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => arg.to_string(),
    }
}
