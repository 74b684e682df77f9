//! Post SonarCloud pull-request issues as inline GitHub review comments.
//!
//! One linear pipeline: resolve inputs, fetch unresolved issues from the
//! SonarCloud issue-search API, filter them to the files changed in the pull
//! request, and submit a single `REQUEST_CHANGES` review with one inline
//! comment per issue.
//!
//! - [`error::ReviewError`] — unified error type using `thiserror`
//! - [`config::Inputs`] — required run inputs from flags with env fallback
//! - [`sonar::SonarClient`] — SonarCloud issue fetcher
//! - [`github::GitHubClient`] — GitHub client behind [`github::PullRequestHost`]
//! - [`review::publish_review`] — filter, group, and submit the review

pub mod config;
pub mod error;
pub mod github;
pub mod review;
pub mod sonar;

pub use error::ReviewError;

/// A convenience `Result` type for review-run operations.
pub type Result<T> = std::result::Result<T, ReviewError>;
