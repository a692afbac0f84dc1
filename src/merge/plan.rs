//! Merge planning - pure functions
//!
//! Label filtering and check aggregation. No I/O happens here, so everything
//! is easy to unit test.

use crate::types::{CheckRun, PullRequest};

/// Status GitHub reports for a finished check run
pub const STATUS_COMPLETED: &str = "completed";
/// The only conclusion that counts as passing
pub const CONCLUSION_SUCCESS: &str = "success";

/// Verdict for a single check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckVerdict {
    /// Completed with `success`
    Passed,
    /// Still queued or running (carries the status)
    NotCompleted(String),
    /// Completed with anything other than `success` (carries the conclusion)
    Unsuccessful(String),
}

impl CheckVerdict {
    /// Whether this verdict allows merging
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl std::fmt::Display for CheckVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "successfully completed"),
            Self::NotCompleted(status) => write!(f, "not yet completed (status {status})"),
            Self::Unsuccessful(conclusion) => {
                write!(f, "not successful (conclusion {conclusion})")
            }
        }
    }
}

/// Judge one check run
pub fn check_verdict(run: &CheckRun) -> CheckVerdict {
    if run.status != STATUS_COMPLETED {
        return CheckVerdict::NotCompleted(run.status.clone());
    }
    match run.conclusion.as_deref() {
        Some(CONCLUSION_SUCCESS) => CheckVerdict::Passed,
        Some(conclusion) => CheckVerdict::Unsuccessful(conclusion.to_string()),
        None => CheckVerdict::Unsuccessful("none".to_string()),
    }
}

/// Whether every check run passed
///
/// An empty list passes: with no checks configured there is nothing to fail.
pub fn all_checks_passed(runs: &[CheckRun]) -> bool {
    runs.iter().all(|run| check_verdict(run).is_passed())
}

/// Keep PRs carrying `label`, preserving order
///
/// Label names are compared exactly: case-sensitive, no trimming.
pub fn filter_by_label<'a>(prs: &'a [PullRequest], label: &str) -> Vec<&'a PullRequest> {
    prs.iter().filter(|pr| pr.has_label(label)).collect()
}
