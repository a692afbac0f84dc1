//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{MergePrCall, MockPlatformService};

use pr_merger::merge::MergeOptions;
use pr_merger::types::{CheckRun, MergeMethod, Mergeability, PullRequest};

/// Build an open PR with the given labels
///
/// Head branch is `branch-{number}` at commit `head{number}`; mergeable
/// unless changed by the caller.
pub fn make_pr(number: u64, labels: &[&str]) -> PullRequest {
    PullRequest {
        number,
        labels: labels.iter().map(|l| (*l).to_string()).collect(),
        head_ref: format!("branch-{number}"),
        head_sha: format!("head{number}"),
        base_ref: "main".to_string(),
        mergeable: Mergeability::Mergeable,
        mergeable_state: Some("clean".to_string()),
    }
}

/// Build a check run
pub fn make_check_run(id: u64, status: &str, conclusion: Option<&str>) -> CheckRun {
    CheckRun {
        id,
        name: format!("check-{id}"),
        status: status.to_string(),
        conclusion: conclusion.map(str::to_string),
    }
}

/// A completed, successful check run
pub fn passing_check(id: u64) -> CheckRun {
    make_check_run(id, "completed", Some("success"))
}

/// Default options for the `deps` label
pub fn deps_options() -> MergeOptions {
    MergeOptions {
        label: "deps".to_string(),
        method: MergeMethod::Merge,
        dry_run: false,
    }
}
