//! Error types for pr-merger
//!
//! Everything in here is run-fatal. Problems with a single pull request are
//! reported through [`crate::merge::CandidateFailure`] instead, so one bad
//! candidate never stops the others from being evaluated.

use thiserror::Error;

/// Run-fatal errors
#[derive(Error, Debug)]
pub enum Error {
    /// No token on the command line or in the environment
    #[error("GitHub token not provided via --token or the GITHUB_TOKEN environment variable")]
    MissingToken,

    /// No repository on the command line or in the environment
    #[error(
        "GitHub repository not provided via --repository or the GITHUB_REPOSITORY environment variable"
    )]
    MissingRepository,

    /// No label filter on the command line
    #[error("label not provided via --label")]
    MissingLabel,

    /// Repository identifier is not `<owner>/<repo>`
    #[error("malformed repository identifier: expected <owner>/<repo>, '{0}' is not")]
    MalformedRepository(String),

    /// Listing open pull requests failed, nothing was evaluated
    #[error("failed to retrieve pull requests from {repo}: {message}")]
    ListPullRequests {
        /// `owner/repo` the listing was for
        repo: String,
        /// Underlying cause
        message: String,
    },

    /// GitHub API or transport failure
    #[error("GitHub API error: {0}")]
    GitHubApi(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => Self::GitHubApi(source.message.clone()),
            _ => Self::GitHubApi(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::GitHubApi(format!("HTTP {status}: {err}")),
            None => Self::GitHubApi(err.to_string()),
        }
    }
}
