use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ReviewError;
use crate::review::ReviewComment;

/// Pull-request operations the publisher needs from the host platform.
///
/// Kept behind a trait so tests can substitute a fake instead of hitting
/// the GitHub API.
#[async_trait]
pub trait PullRequestHost {
    /// List the filenames changed in the pull request.
    async fn list_changed_files(&self, pr_number: u64) -> Result<Vec<String>, ReviewError>;

    /// Create a single review with the given event, summary body, and
    /// inline comments.
    async fn create_review(
        &self,
        pr_number: u64,
        event: &str,
        body: &str,
        comments: &[ReviewComment],
    ) -> Result<(), ReviewError>;
}

/// GitHub client for a single repository, backed by octocrab.
pub struct GitHubClient {
    octocrab: octocrab::Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Build an authenticated client for `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Publish`] if the client cannot be built.
    pub fn new(token: &str, owner: &str, repo: &str) -> Result<Self, ReviewError> {
        let octocrab = octocrab::Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(|e| ReviewError::Publish(format!("failed to create GitHub client: {e}")))?;
        Ok(Self {
            octocrab,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PrFile {
    filename: String,
}

#[async_trait]
impl PullRequestHost for GitHubClient {
    async fn list_changed_files(&self, pr_number: u64) -> Result<Vec<String>, ReviewError> {
        let route = format!(
            "/repos/{}/{}/pulls/{pr_number}/files?per_page=100",
            self.owner, self.repo
        );
        let files: Vec<PrFile> = self
            .octocrab
            .get(route, None::<&()>)
            .await
            .map_err(|e| ReviewError::Publish(format!("failed to list PR files: {e}")))?;
        Ok(files.into_iter().map(|f| f.filename).collect())
    }

    async fn create_review(
        &self,
        pr_number: u64,
        event: &str,
        body: &str,
        comments: &[ReviewComment],
    ) -> Result<(), ReviewError> {
        let route = format!(
            "/repos/{}/{}/pulls/{pr_number}/reviews",
            self.owner, self.repo
        );
        let payload = serde_json::json!({
            "event": event,
            "body": body,
            "comments": comments,
        });

        let _response: serde_json::Value = self
            .octocrab
            .post(route, Some(&payload))
            .await
            .map_err(|e| ReviewError::Publish(format!("failed to create PR review: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pr_file_deserializes_filename() {
        let file: PrFile =
            serde_json::from_str(r#"{"filename": "src/a.js", "status": "modified"}"#).unwrap();
        assert_eq!(file.filename, "src/a.js");
    }

    #[tokio::test]
    async fn client_construction_succeeds() {
        let client = GitHubClient::new("ghp_test", "owner", "repo");
        assert!(client.is_ok());
    }
}
