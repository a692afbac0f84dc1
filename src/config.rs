//! Run configuration
//!
//! Values come from explicit parameters first and fall back to the
//! environment GitHub Actions provides. Validation happens once, up front,
//! before any API call is made.

use crate::error::{Error, Result};
use crate::types::RepoId;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
/// Environment variable holding `owner/repo`
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

/// Raw, unvalidated inputs (typically straight from the command line)
#[derive(Debug, Clone, Default)]
pub struct ConfigInputs {
    /// `--token`
    pub token: Option<String>,
    /// `--repository`
    pub repository: Option<String>,
    /// `--label`
    pub label: Option<String>,
}

/// Validated configuration for one run
#[derive(Clone)]
pub struct Config {
    /// Target repository
    pub repo: RepoId,
    /// API token
    pub token: String,
    /// Only PRs carrying this label are considered
    pub label: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .field("label", &self.label)
            .finish()
    }
}

impl Config {
    /// Resolve against the process environment
    pub fn from_inputs(inputs: ConfigInputs) -> Result<Self> {
        Self::resolve(inputs, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup
    ///
    /// A parameter that was passed explicitly wins even when it is empty.
    /// Checks run in order token, repository, label, repository shape; the
    /// first failure is returned.
    pub fn resolve<F>(inputs: ConfigInputs, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = inputs.token.or_else(|| env(TOKEN_ENV)).unwrap_or_default();
        if token.trim().is_empty() {
            return Err(Error::MissingToken);
        }

        let repository = inputs
            .repository
            .or_else(|| env(REPOSITORY_ENV))
            .unwrap_or_default();
        if repository.trim().is_empty() {
            return Err(Error::MissingRepository);
        }

        let label = inputs.label.unwrap_or_default();
        if label.trim().is_empty() {
            return Err(Error::MissingLabel);
        }

        let repo = parse_repo_id(&repository)?;

        Ok(Self { repo, token, label })
    }
}

/// Split `owner/repo` into its two parts
pub fn parse_repo_id(raw: &str) -> Result<RepoId> {
    match raw.split('/').collect::<Vec<_>>().as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(RepoId {
            owner: (*owner).to_string(),
            name: (*name).to_string(),
        }),
        _ => Err(Error::MalformedRepository(raw.to_string())),
    }
}
