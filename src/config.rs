use crate::error::ReviewError;

/// Raw input values as collected from the CLI, before env fallback.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    /// `--project-key` value, if given.
    pub project_key: Option<String>,
    /// `--sonar-token` value, if given.
    pub sonar_token: Option<String>,
    /// `--github-token` value, if given.
    pub github_token: Option<String>,
    /// `--pr-number` value, if given.
    pub pr_number: Option<String>,
    /// `--repo` value (`owner/name`), if given.
    pub repo: Option<String>,
    /// Base URL of the SonarCloud / SonarQube instance.
    pub sonar_url: String,
}

/// Resolved inputs for a single review run.
///
/// Every field is mandatory; resolution fails before any network call if one
/// is missing. Each value comes from its CLI flag, falling back to the env
/// var the surrounding CI already sets.
///
/// # Examples
///
/// ```
/// use sonar_review::config::{Inputs, RawInputs};
///
/// let raw = RawInputs {
///     project_key: Some("my_org_my-project".into()),
///     sonar_token: Some("squ_xxxx".into()),
///     github_token: Some("ghp_xxxx".into()),
///     pr_number: Some("42".into()),
///     repo: Some("octocat/hello-world".into()),
///     sonar_url: "https://sonarcloud.io".into(),
/// };
/// let inputs = Inputs::resolve(raw).unwrap();
/// assert_eq!(inputs.pr_number, 42);
/// assert_eq!(inputs.owner, "octocat");
/// ```
#[derive(Debug, Clone)]
pub struct Inputs {
    /// SonarCloud project identifier.
    pub project_key: String,
    /// SonarCloud API credential.
    pub sonar_token: String,
    /// GitHub API credential.
    pub github_token: String,
    /// Pull request number to review.
    pub pr_number: u64,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Base URL of the SonarCloud / SonarQube instance, no trailing slash.
    pub sonar_url: String,
}

impl Inputs {
    /// Resolve all required inputs, reading env fallbacks for absent flags.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Config`] if a required value is missing, the
    /// PR number is not numeric, or the repository is not `owner/name`.
    pub fn resolve(raw: RawInputs) -> Result<Self, ReviewError> {
        let project_key = required(raw.project_key, "project-key", "SONAR_PROJECT_KEY")?;
        let sonar_token = required(raw.sonar_token, "sonar-token", "SONAR_TOKEN")?;
        let github_token = required(raw.github_token, "github-token", "GITHUB_TOKEN")?;
        let pr_number = parse_pr_number(&required(raw.pr_number, "pr-number", "PR_NUMBER")?)?;
        let (owner, repo) = parse_repo(&required(raw.repo, "repo", "GITHUB_REPOSITORY")?)?;

        Ok(Self {
            project_key,
            sonar_token,
            github_token,
            pr_number,
            owner,
            repo,
            sonar_url: raw.sonar_url.trim_end_matches('/').to_string(),
        })
    }
}

fn required(value: Option<String>, flag: &str, env_var: &str) -> Result<String, ReviewError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => std::env::var(env_var)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ReviewError::Config(format!(
                    "{env_var} not set. Pass --{flag} or set {env_var} env var"
                ))
            }),
    }
}

/// Parse the pull-request number, failing fast on non-numeric input.
pub fn parse_pr_number(raw: &str) -> Result<u64, ReviewError> {
    raw.trim()
        .parse()
        .map_err(|_| ReviewError::Config(format!("invalid PR number: {raw}")))
}

/// Parse an `owner/name` repository reference into its components.
///
/// # Errors
///
/// Returns [`ReviewError::Config`] if the format is invalid.
///
/// # Examples
///
/// ```
/// use sonar_review::config::parse_repo;
///
/// let (owner, name) = parse_repo("rust-lang/rust").unwrap();
/// assert_eq!(owner, "rust-lang");
/// assert_eq!(name, "rust");
/// ```
pub fn parse_repo(raw: &str) -> Result<(String, String), ReviewError> {
    let Some((owner, name)) = raw.split_once('/') else {
        return Err(ReviewError::Config(format!(
            "invalid repository '{raw}', expected owner/name"
        )));
    };
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(ReviewError::Config(format!(
            "invalid repository '{raw}', expected owner/name"
        )));
    }
    Ok((owner.to_string(), name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_raw() -> RawInputs {
        RawInputs {
            project_key: Some("key".into()),
            sonar_token: Some("st".into()),
            github_token: Some("gt".into()),
            pr_number: Some("7".into()),
            repo: Some("owner/name".into()),
            sonar_url: "https://sonarcloud.io".into(),
        }
    }

    #[test]
    fn resolve_with_all_flags() {
        let inputs = Inputs::resolve(full_raw()).unwrap();
        assert_eq!(inputs.project_key, "key");
        assert_eq!(inputs.pr_number, 7);
        assert_eq!(inputs.owner, "owner");
        assert_eq!(inputs.repo, "name");
    }

    #[test]
    fn missing_input_fails_with_flag_and_env_names() {
        let raw = RawInputs {
            sonar_token: None,
            ..full_raw()
        };
        // SONAR_TOKEN is not set in the test environment
        std::env::remove_var("SONAR_TOKEN");
        let err = Inputs::resolve(raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("SONAR_TOKEN"));
        assert!(msg.contains("--sonar-token"));
    }

    #[test]
    fn env_fallback_fills_missing_flag() {
        std::env::set_var("SONAR_PROJECT_KEY_TEST_FALLBACK", "from-env");
        let got = required(None, "project-key", "SONAR_PROJECT_KEY_TEST_FALLBACK").unwrap();
        assert_eq!(got, "from-env");
    }

    #[test]
    fn empty_flag_value_counts_as_missing() {
        std::env::remove_var("SONAR_REVIEW_EMPTY_TEST");
        let result = required(Some(String::new()), "x", "SONAR_REVIEW_EMPTY_TEST");
        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_pr_number_fails_fast() {
        let err = parse_pr_number("abc").unwrap_err();
        assert!(err.to_string().contains("invalid PR number"));
    }

    #[test]
    fn pr_number_tolerates_whitespace() {
        assert_eq!(parse_pr_number(" 42 ").unwrap(), 42);
    }

    #[test]
    fn parse_repo_rejects_bad_shapes() {
        assert!(parse_repo("no-slash").is_err());
        assert!(parse_repo("/name").is_err());
        assert!(parse_repo("owner/").is_err());
        assert!(parse_repo("a/b/c").is_err());
    }

    #[test]
    fn sonar_url_trailing_slash_is_trimmed() {
        let raw = RawInputs {
            sonar_url: "https://sonar.example.com/".into(),
            ..full_raw()
        };
        let inputs = Inputs::resolve(raw).unwrap();
        assert_eq!(inputs.sonar_url, "https://sonar.example.com");
    }
}
