//! Platform services
//!
//! The merge pipeline only talks to GitHub through [`PlatformService`], so it
//! can be driven by a mock in tests.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{CheckRun, MergeMethod, MergeResult, PullRequest, RepoId};
use async_trait::async_trait;

/// Platform service trait for the operations the merger needs
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List every open PR in the repository
    ///
    /// Implementations follow pagination so the result is complete.
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>>;

    /// Fetch a single PR
    ///
    /// Unlike the listing, this makes GitHub compute the mergeable flag.
    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest>;

    /// List check runs for a ref (branch name or SHA)
    ///
    /// Implementations follow pagination. A list shorter than the reported
    /// total is an error, never a partial result.
    async fn list_check_runs(&self, git_ref: &str) -> Result<Vec<CheckRun>>;

    /// Merge a PR using `commit_message` as the merge commit message
    ///
    /// The merge only happens while the head is still at `head_sha`.
    async fn merge_pr(
        &self,
        pr_number: u64,
        head_sha: &str,
        method: MergeMethod,
        commit_message: &str,
    ) -> Result<MergeResult>;

    /// Repository this service operates on
    fn repo(&self) -> &RepoId;
}
