/// Errors that can occur during a review run.
///
/// Each variant is terminal: nothing is retried and nothing downgrades to a
/// warning. The binary converts to `miette` diagnostics at the boundary.
///
/// # Examples
///
/// ```
/// use sonar_review::ReviewError;
///
/// let err = ReviewError::Fetch { status: 403 };
/// assert!(err.to_string().contains("403"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// A required input is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// SonarCloud responded with a non-200 status.
    #[error("SonarCloud API request failed with status code {status}")]
    Fetch {
        /// HTTP status code returned by the issue-search endpoint.
        status: u16,
    },

    /// SonarCloud response body was not valid JSON.
    #[error("failed to parse SonarCloud API response: {0}")]
    Parse(String),

    /// GitHub rejected a pull-request API call.
    #[error("GitHub API error: {0}")]
    Publish(String),

    /// Transport-level failure reaching SonarCloud.
    #[error("SonarCloud request error: {0}")]
    Http(#[from] reqwest::Error),
}
