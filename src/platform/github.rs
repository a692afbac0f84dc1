//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{CheckRun, MergeMethod, MergeResult, PullRequest, RepoId};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

const PUBLIC_API_BASE: &str = "https://api.github.com";
const PER_PAGE: u8 = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    repo: RepoId,
    /// Token for raw HTTP requests (check runs)
    token: String,
    /// HTTP client for raw requests (check runs)
    http_client: Client,
    /// API base URL, no trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance; `None` means github.com.
    pub fn new(token: &str, repo: RepoId, host: Option<&str>) -> Result<Self> {
        let api_base = host.map_or_else(
            || PUBLIC_API_BASE.to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(token, repo, &api_base)
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: &str, repo: RepoId, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(&api_base)
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent(concat!("pr-merger/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            repo,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// URL of the check-runs endpoint for `git_ref`
    ///
    /// Each `/`-separated part of the ref is percent-encoded on its own, so
    /// `feature/x` keeps its slash while `#` or `?` in a branch name stay in
    /// the path.
    fn check_runs_url(&self, git_ref: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| Error::GitHubApi(format!("Invalid API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::GitHubApi(format!("Invalid API base URL: {}", self.api_base)))?
            .pop_if_empty()
            .extend(["repos", self.repo.owner.as_str(), self.repo.name.as_str(), "commits"])
            .extend(git_ref.split('/'))
            .push("check-runs");
        Ok(url)
    }

    async fn check_runs_page(&self, url: &Url, page: u32) -> Result<CheckRunsPage> {
        let response = self
            .http_client
            .get(url.clone())
            .query(&[("per_page", u32::from(PER_PAGE)), ("page", page)])
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch check runs: {e}")))?
            .error_for_status()?;

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse check runs: {e}")))
    }
}

/// One page of the check-runs endpoint
#[derive(Deserialize)]
struct CheckRunsPage {
    total_count: usize,
    check_runs: Vec<CheckRun>,
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default(),
        head_ref: pr.head.ref_field.clone(),
        head_sha: pr.head.sha.clone(),
        base_ref: pr.base.ref_field.clone(),
        mergeable: pr.mergeable.into(),
        // Serialized form is the wire string (`clean`, `dirty`, ...)
        mergeable_state: pr.mergeable_state.as_ref().and_then(|state| {
            serde_json::to_value(state)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
        }),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        debug!(repo = %self.repo, "listing open PRs");
        let first_page = self
            .client
            .pulls(&self.repo.owner, &self.repo.name)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(PER_PAGE)
            .send()
            .await?;

        let prs = self.client.all_pages(first_page).await?;

        let result: Vec<PullRequest> = prs.iter().map(pr_from_octocrab).collect();
        debug!(count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "getting PR");
        let pr = self
            .client
            .pulls(&self.repo.owner, &self.repo.name)
            .get(pr_number)
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number, mergeable = %result.mergeable, "got PR");
        Ok(result)
    }

    async fn list_check_runs(&self, git_ref: &str) -> Result<Vec<CheckRun>> {
        debug!(git_ref, "listing check runs");
        let url = self.check_runs_url(git_ref)?;

        let mut runs = Vec::new();
        let mut page = 1;
        loop {
            let CheckRunsPage {
                total_count,
                check_runs,
            } = self.check_runs_page(&url, page).await?;
            debug!(
                git_ref,
                page,
                total_count,
                returned = check_runs.len(),
                "got check runs page"
            );

            let page_was_empty = check_runs.is_empty();
            runs.extend(check_runs);
            if runs.len() >= total_count {
                break;
            }
            if page_was_empty {
                return Err(Error::GitHubApi(format!(
                    "check runs for {git_ref} are incomplete: got {} of {total_count}",
                    runs.len()
                )));
            }
            page += 1;
        }

        debug!(git_ref, count = runs.len(), "listed check runs");
        Ok(runs)
    }

    async fn merge_pr(
        &self,
        pr_number: u64,
        head_sha: &str,
        method: MergeMethod,
        commit_message: &str,
    ) -> Result<MergeResult> {
        debug!(pr_number, head_sha, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.repo.owner, &self.repo.name)
            .merge(pr_number)
            .sha(head_sha)
            .method(octocrab_method)
            .message(commit_message)
            .send()
            .await?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }

    fn repo(&self) -> &RepoId {
        &self.repo
    }
}
