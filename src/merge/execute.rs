//! Merge execution - effectful operations
//!
//! Walks the labeled PRs, checks each one against the platform and merges
//! those that are ready. Per-PR problems are collected into the
//! [`RunSummary`]; only failing to list PRs aborts the run.

use crate::error::{Error, Result};
use crate::merge::plan::{all_checks_passed, check_verdict, filter_by_label};
use crate::platform::PlatformService;
use crate::types::{MergeMethod, Mergeability, PullRequest};
use tracing::{info, warn};

/// Commit message used for every merge
pub const MERGE_COMMIT_MESSAGE: &str = "Merged by merger";

/// Options for a merge run
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Only PRs with this label are considered
    pub label: String,
    /// How to merge
    pub method: MergeMethod,
    /// Evaluate but never call merge
    pub dry_run: bool,
}

/// What happened to a PR that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// Merged, with the resulting commit SHA when GitHub reported one
    Merged {
        /// Merge commit SHA
        sha: Option<String>,
    },
    /// Dry run: would have been merged
    WouldMerge,
    /// Checks have not all passed yet; try again next run
    Skipped {
        /// One entry per check run that blocked the merge
        reasons: Vec<String>,
    },
}

/// Why a PR could not be merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Check runs could not be fetched
    CheckFetchFailed {
        /// Head branch the check runs were requested for
        branch: String,
        /// Underlying cause
        message: String,
    },
    /// Checks passed but GitHub does not consider the PR mergeable
    NotMergeable {
        /// Mergeable flag at decision time
        mergeable: Mergeability,
        /// GitHub's `mergeable_state` descriptor
        state: Option<String>,
    },
    /// The merge call failed or was refused
    MergeFailed {
        /// Underlying cause
        message: String,
    },
}

/// A per-PR failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    /// PR number
    pub pr_number: u64,
    /// What went wrong
    pub kind: FailureKind,
}

impl std::fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let number = self.pr_number;
        match &self.kind {
            FailureKind::CheckFetchFailed { branch, message } => write!(
                f,
                "failed to get check runs for pull request {number} (branch {branch}): {message}"
            ),
            FailureKind::NotMergeable { mergeable, state } => write!(
                f,
                "pull request {number} is not in a mergeable state ({mergeable}, state {})",
                state.as_deref().unwrap_or("unknown")
            ),
            FailureKind::MergeFailed { message } => {
                write!(f, "failed to merge pull request {number}: {message}")
            }
        }
    }
}

/// Result of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Open PRs retrieved
    pub total_prs: usize,
    /// PRs carrying the label
    pub candidates: usize,
    /// Merged PRs with their merge commit SHA
    pub merged: Vec<(u64, Option<String>)>,
    /// PRs that would have been merged (dry run)
    pub would_merge: Vec<u64>,
    /// PRs skipped because checks had not passed
    pub skipped: Vec<u64>,
    /// Per-PR failures
    pub failures: Vec<CandidateFailure>,
}

impl RunSummary {
    /// Number of per-PR failures
    #[must_use]
    pub const fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// True when no candidate failed
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(
        &mut self,
        pr_number: u64,
        result: std::result::Result<CandidateOutcome, CandidateFailure>,
    ) {
        match result {
            Ok(CandidateOutcome::Merged { sha }) => self.merged.push((pr_number, sha)),
            Ok(CandidateOutcome::WouldMerge) => self.would_merge.push(pr_number),
            Ok(CandidateOutcome::Skipped { .. }) => self.skipped.push(pr_number),
            Err(failure) => {
                warn!("{failure}");
                self.failures.push(failure);
            }
        }
    }
}

/// Run the whole pipeline: list, filter, then check and merge each candidate
///
/// Returns `Err` only when the listing fails; per-PR failures end up in the
/// summary.
pub async fn run_merge(
    platform: &dyn PlatformService,
    options: &MergeOptions,
) -> Result<RunSummary> {
    let repo = platform.repo().to_string();

    let prs = platform
        .list_open_prs()
        .await
        .map_err(|e| Error::ListPullRequests {
            repo: repo.clone(),
            message: e.to_string(),
        })?;
    info!("Retrieved a total of {} pull requests from {repo}", prs.len());

    let candidates = filter_by_label(&prs, &options.label);
    info!(
        "Found {} pull requests in {repo} with the label {}",
        candidates.len(),
        options.label
    );

    let mut summary = RunSummary {
        total_prs: prs.len(),
        candidates: candidates.len(),
        ..RunSummary::default()
    };

    for pr in candidates {
        let result = check_and_merge(platform, pr, options).await;
        summary.record(pr.number, result);
    }

    Ok(summary)
}

/// Check a single PR and merge it if it is ready
pub async fn check_and_merge(
    platform: &dyn PlatformService,
    pr: &PullRequest,
    options: &MergeOptions,
) -> std::result::Result<CandidateOutcome, CandidateFailure> {
    let number = pr.number;

    let runs = platform
        .list_check_runs(&pr.head_ref)
        .await
        .map_err(|e| CandidateFailure {
            pr_number: number,
            kind: FailureKind::CheckFetchFailed {
                branch: pr.head_ref.clone(),
                message: e.to_string(),
            },
        })?;
    info!("Found {} check runs for pull request {number}", runs.len());

    for run in &runs {
        let verdict = check_verdict(run);
        if verdict.is_passed() {
            info!("Check run {} for pull request {number} {verdict}", run.id);
        } else {
            info!(
                "Check run {} for pull request {number} {verdict}. Not merging it.",
                run.id
            );
        }
    }

    if !all_checks_passed(&runs) {
        let reasons: Vec<String> = runs
            .iter()
            .map(|run| (run, check_verdict(run)))
            .filter(|(_, verdict)| !verdict.is_passed())
            .map(|(run, verdict)| format!("{} ({}): {verdict}", run.name, run.id))
            .collect();
        info!(
            "Skipping pull request {number}: {} of {} check runs have not passed",
            reasons.len(),
            runs.len()
        );
        return Ok(CandidateOutcome::Skipped { reasons });
    }
    info!("All checks for pull request {number} passed");

    let (mergeable, state) = resolve_mergeability(platform, pr).await;
    if mergeable != Mergeability::Mergeable {
        return Err(CandidateFailure {
            pr_number: number,
            kind: FailureKind::NotMergeable { mergeable, state },
        });
    }

    if options.dry_run {
        info!("Dry run: would merge pull request {number} into {}", pr.base_ref);
        return Ok(CandidateOutcome::WouldMerge);
    }

    let merge_failed = |message: String| CandidateFailure {
        pr_number: number,
        kind: FailureKind::MergeFailed { message },
    };

    match platform
        .merge_pr(number, &pr.head_sha, options.method, MERGE_COMMIT_MESSAGE)
        .await
    {
        Ok(result) if result.merged => {
            info!(
                "Successfully merged pull request {number} as commit {}",
                result.sha.as_deref().unwrap_or("(no sha)")
            );
            Ok(CandidateOutcome::Merged { sha: result.sha })
        }
        Ok(result) => Err(merge_failed(
            result
                .message
                .unwrap_or_else(|| "merge was not performed".to_string()),
        )),
        Err(e) => Err(merge_failed(e.to_string())),
    }
}

/// Mergeability for the gate
///
/// The listing endpoint leaves the flag uncomputed, so an unknown flag is
/// re-read once from the single-PR endpoint. A failed refresh keeps the
/// snapshot's values, which then fail the gate.
async fn resolve_mergeability(
    platform: &dyn PlatformService,
    pr: &PullRequest,
) -> (Mergeability, Option<String>) {
    if pr.mergeable != Mergeability::Unknown {
        return (pr.mergeable, pr.mergeable_state.clone());
    }

    match platform.get_pr(pr.number).await {
        Ok(fresh) => (fresh.mergeable, fresh.mergeable_state),
        Err(e) => {
            warn!(
                "Could not refresh mergeable state of pull request {}: {e}",
                pr.number
            );
            (pr.mergeable, pr.mergeable_state.clone())
        }
    }
}
