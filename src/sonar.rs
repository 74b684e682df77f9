use serde::Deserialize;

use crate::error::ReviewError;

/// A single unresolved static-analysis finding from SonarCloud.
///
/// Fields come verbatim from the issue-search response; the `component` path
/// still carries the `"<projectKey>:"` prefix.
///
/// # Examples
///
/// ```
/// use sonar_review::sonar::Issue;
///
/// let issue: Issue = serde_json::from_str(
///     r#"{"key":"AY1","component":"my-project:src/a.js","line":3,
///         "severity":"MAJOR","message":"Remove this unused variable."}"#,
/// ).unwrap();
/// assert_eq!(issue.line, Some(3));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue key, used to deep-link back to the SonarCloud UI.
    pub key: String,
    /// Component path, prefixed with the project key.
    pub component: String,
    /// Line number, absent for file-level issues.
    #[serde(default)]
    pub line: Option<u64>,
    /// Severity label, passed through verbatim (e.g. `MAJOR`, `CRITICAL`).
    pub severity: String,
    /// Human-readable description of the finding.
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    issues: Vec<Issue>,
}

/// SonarCloud issue-search client.
///
/// Authenticates with HTTP Basic auth where the username is the API token
/// and the password is empty.
pub struct SonarClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl SonarClient {
    /// Create a client for the given token and instance base URL.
    pub fn new(token: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch all unresolved issues for a project's pull request.
    ///
    /// One GET against `/api/issues/search`, no retries, default timeouts.
    /// The returned list may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Http`] if the request cannot be sent,
    /// [`ReviewError::Fetch`] on a non-200 status, or [`ReviewError::Parse`]
    /// if the body is not the expected JSON shape.
    pub async fn fetch_issues(
        &self,
        project_key: &str,
        pr_number: u64,
    ) -> Result<Vec<Issue>, ReviewError> {
        let url = format!("{}/api/issues/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("componentKeys", project_key),
                ("pullRequest", &pr_number.to_string()),
                ("resolved", "false"),
            ])
            .basic_auth(&self.token, None::<&str>)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ReviewError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_issues(&body)
    }
}

/// Parse an issue-search response body into its `issues` array.
///
/// # Errors
///
/// Returns [`ReviewError::Parse`] if the body is not well-formed JSON or
/// lacks the expected fields.
pub fn parse_issues(body: &str) -> Result<Vec<Issue>, ReviewError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| ReviewError::Parse(e.to_string()))?;
    Ok(response.issues)
}
