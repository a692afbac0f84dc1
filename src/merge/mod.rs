//! Merge engine for labeled PRs
//!
//! Two-phase pattern:
//! 1. Plan - label filtering and check verdicts (pure, testable)
//! 2. Execute - fetch checks, gate on mergeability, merge (effectful)

mod execute;
mod plan;

pub use execute::{
    CandidateFailure, CandidateOutcome, FailureKind, MERGE_COMMIT_MESSAGE, MergeOptions,
    RunSummary, check_and_merge, run_merge,
};
pub use plan::{CheckVerdict, all_checks_passed, check_verdict, filter_by_label};
