//! pr-merger: merge labeled GitHub pull requests once their checks pass
//!
//! Meant to run on a schedule. Each run lists the open PRs of one repository,
//! keeps those carrying a label, and merges every one whose check runs all
//! completed successfully and which GitHub reports as mergeable.

pub mod config;
pub mod error;
pub mod merge;
pub mod platform;
pub mod types;
