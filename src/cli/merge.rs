//! Merge command - check and merge labeled PRs

use crate::cli::style::{Stylize, check, cross};
use anstream::eprintln;
use pr_merger::config::{Config, ConfigInputs};
use pr_merger::error::{Error, Result};
use pr_merger::merge::{self, MergeOptions, RunSummary};
use pr_merger::platform::GitHubService;
use pr_merger::types::MergeMethod;
use tracing::debug;

/// Options for the merge command
#[derive(Debug, Clone, Default)]
pub struct MergeCommand {
    /// Token, repository and label as passed on the command line
    pub inputs: ConfigInputs,
    /// GitHub Enterprise host
    pub host: Option<String>,
    /// Merge method
    pub method: MergeMethod,
    /// Dry run - show what would be merged without merging
    pub dry_run: bool,
}

/// Run the merge command
///
/// Configuration and listing errors are returned as `Err`; per-PR failures
/// are in the returned summary.
pub async fn run_merge(command: MergeCommand) -> Result<RunSummary> {
    let config = Config::from_inputs(command.inputs)?;
    debug!(?config, "resolved configuration");

    let platform = GitHubService::new(
        &config.token,
        config.repo.clone(),
        command.host.as_deref(),
    )?;

    let options = MergeOptions {
        label: config.label,
        method: command.method,
        dry_run: command.dry_run,
    };

    let summary = merge::run_merge(&platform, &options).await?;
    print_summary(&summary);
    Ok(summary)
}

/// Print a run-fatal error
///
/// Goes straight to stderr so it shows even when logging is filtered out.
pub fn print_error(err: &Error) {
    eprintln!("{} {}", cross(), err.error());
}

/// Print the run summary
fn print_summary(summary: &RunSummary) {
    for (number, sha) in &summary.merged {
        eprintln!(
            "{} Merged #{} {}",
            check(),
            number.accent(),
            sha.as_deref().unwrap_or("(no sha)").muted()
        );
    }
    for number in &summary.would_merge {
        eprintln!("{} Would merge #{}", "?".warn(), number.accent());
    }
    if !summary.skipped.is_empty() {
        let skipped: Vec<String> = summary.skipped.iter().map(|n| format!("#{n}")).collect();
        eprintln!(
            "{}",
            format!("Checks pending or failing, skipped: {}", skipped.join(", ")).muted()
        );
    }
    for failure in &summary.failures {
        eprintln!("{} {failure}", cross());
    }

    if summary.is_success() {
        eprintln!(
            "{} {} of {} labeled pull requests handled",
            check(),
            summary.candidates - summary.skipped.len(),
            summary.candidates
        );
    } else {
        eprintln!(
            "{}",
            format!(
                "Failed to check and merge {}/{} pull requests. See the above logs for details.",
                summary.failure_count(),
                summary.candidates
            )
            .error()
        );
    }
}
