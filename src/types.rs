//! Core types for pr-merger

use serde::Deserialize;

/// Repository coordinates (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Whether GitHub considers a PR mergeable
///
/// The REST API reports this as a nullable boolean; `null` means GitHub has
/// not finished computing it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mergeability {
    /// No conflicts, can be merged
    Mergeable,
    /// Conflicts or otherwise blocked
    Conflicting,
    /// Not computed yet
    Unknown,
}

impl From<Option<bool>> for Mergeability {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Mergeable,
            Some(false) => Self::Conflicting,
            None => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Mergeability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mergeable => write!(f, "mergeable"),
            Self::Conflicting => write!(f, "not mergeable"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// An open pull request, as seen at listing time
#[derive(Debug, Clone)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Label names, in the order GitHub returned them
    pub labels: Vec<String>,
    /// Head branch name
    pub head_ref: String,
    /// Head commit SHA; the merge is refused if the branch has moved past it
    pub head_sha: String,
    /// Base branch name
    pub base_ref: String,
    /// Mergeable flag
    pub mergeable: Mergeability,
    /// GitHub's `mergeable_state` descriptor (`clean`, `dirty`, `blocked`, ...)
    pub mergeable_state: Option<String>,
}

impl PullRequest {
    /// Whether one of the labels is exactly `label`
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// A single check run against a ref
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CheckRun {
    /// Check run ID
    pub id: u64,
    /// Check name (e.g. the workflow job)
    #[serde(default)]
    pub name: String,
    /// `queued`, `in_progress`, `completed`, ...
    pub status: String,
    /// Set once `status` is `completed`
    pub conclusion: Option<String>,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MergeMethod {
    /// Create a merge commit
    #[default]
    Merge,
    /// Squash all commits into one
    Squash,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Squash => write!(f, "squash"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}
