//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use pr_merger::error::{Error, Result};
use pr_merger::platform::PlatformService;
use pr_merger::types::{CheckRun, MergeMethod, MergeResult, PullRequest, RepoId};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub head_sha: String,
    pub method: MergeMethod,
    pub commit_message: String,
}

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall,
/// because mockall has issues with methods returning references.
///
/// Features:
/// - Canned PR listing, single-PR and check-run responses
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    repo: RepoId,
    open_prs: Mutex<Vec<PullRequest>>,
    get_pr_responses: Mutex<HashMap<u64, PullRequest>>,
    check_run_responses: Mutex<HashMap<String, Vec<CheckRun>>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    // Call tracking
    list_prs_calls: Mutex<usize>,
    get_pr_calls: Mutex<Vec<u64>>,
    check_run_calls: Mutex<Vec<String>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_list_prs: Mutex<Option<String>>,
    error_on_check_runs: Mutex<HashMap<String, String>>,
    error_on_merge_pr: Mutex<HashMap<u64, String>>,
}

impl MockPlatformService {
    /// Create a new mock for `acme/widgets`
    pub fn new() -> Self {
        Self::with_repo(RepoId {
            owner: "acme".to_string(),
            name: "widgets".to_string(),
        })
    }

    /// Create a new mock for the given repository
    pub fn with_repo(repo: RepoId) -> Self {
        Self {
            repo,
            open_prs: Mutex::new(Vec::new()),
            get_pr_responses: Mutex::new(HashMap::new()),
            check_run_responses: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            list_prs_calls: Mutex::new(0),
            get_pr_calls: Mutex::new(Vec::new()),
            check_run_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_list_prs: Mutex::new(None),
            error_on_check_runs: Mutex::new(HashMap::new()),
            error_on_merge_pr: Mutex::new(HashMap::new()),
        }
    }

    // === Error injection methods ===

    /// Make `list_open_prs` return an error
    pub fn fail_list_prs(&self, msg: &str) {
        *self.error_on_list_prs.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_check_runs` return an error for `git_ref`
    pub fn fail_check_runs(&self, git_ref: &str, msg: &str) {
        self.error_on_check_runs
            .lock()
            .unwrap()
            .insert(git_ref.to_string(), msg.to_string());
    }

    /// Make `merge_pr` return an error for `pr_number`
    pub fn fail_merge_pr(&self, pr_number: u64, msg: &str) {
        self.error_on_merge_pr
            .lock()
            .unwrap()
            .insert(pr_number, msg.to_string());
    }

    // === Response setup ===

    /// Add a PR to the open listing
    pub fn add_open_pr(&self, pr: PullRequest) {
        self.open_prs.lock().unwrap().push(pr);
    }

    /// Set the response for `get_pr`
    pub fn set_get_pr_response(&self, pr: PullRequest) {
        self.get_pr_responses.lock().unwrap().insert(pr.number, pr);
    }

    /// Set the check runs returned for `git_ref`
    pub fn set_check_runs(&self, git_ref: &str, runs: Vec<CheckRun>) {
        self.check_run_responses
            .lock()
            .unwrap()
            .insert(git_ref.to_string(), runs);
    }

    /// Set the response for `merge_pr` for a specific PR
    pub fn set_merge_response(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    // === Call inspection ===

    pub fn list_prs_call_count(&self) -> usize {
        *self.list_prs_calls.lock().unwrap()
    }

    pub fn get_get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    pub fn get_check_run_calls(&self) -> Vec<String> {
        self.check_run_calls.lock().unwrap().clone()
    }

    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        *self.list_prs_calls.lock().unwrap() += 1;
        if let Some(msg) = self.error_on_list_prs.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest> {
        self.get_pr_calls.lock().unwrap().push(pr_number);
        if let Some(pr) = self.get_pr_responses.lock().unwrap().get(&pr_number) {
            return Ok(pr.clone());
        }
        self.open_prs
            .lock()
            .unwrap()
            .iter()
            .find(|pr| pr.number == pr_number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number} not found")))
    }

    async fn list_check_runs(&self, git_ref: &str) -> Result<Vec<CheckRun>> {
        self.check_run_calls
            .lock()
            .unwrap()
            .push(git_ref.to_string());
        if let Some(msg) = self.error_on_check_runs.lock().unwrap().get(git_ref) {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(self
            .check_run_responses
            .lock()
            .unwrap()
            .get(git_ref)
            .cloned()
            .unwrap_or_default())
    }

    async fn merge_pr(
        &self,
        pr_number: u64,
        head_sha: &str,
        method: MergeMethod,
        commit_message: &str,
    ) -> Result<MergeResult> {
        self.merge_pr_calls.lock().unwrap().push(MergePrCall {
            pr_number,
            head_sha: head_sha.to_string(),
            method,
            commit_message: commit_message.to_string(),
        });
        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().get(&pr_number) {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(self
            .merge_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_else(|| MergeResult {
                merged: true,
                sha: Some(format!("sha{pr_number}")),
                message: Some("Pull Request successfully merged".to_string()),
            }))
    }

    fn repo(&self) -> &RepoId {
        &self.repo
    }
}
