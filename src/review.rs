use serde::Serialize;

use crate::error::ReviewError;
use crate::github::PullRequestHost;
use crate::sonar::Issue;

/// Review event submitted when issues are found.
pub const REQUEST_CHANGES: &str = "REQUEST_CHANGES";

/// A single inline comment in the review payload.
///
/// `line` is omitted from the serialized payload when absent, which GitHub
/// treats as a file-level comment.
///
/// # Examples
///
/// ```
/// use sonar_review::review::ReviewComment;
///
/// let comment = ReviewComment {
///     path: "src/a.js".into(),
///     line: None,
///     body: "something is off".into(),
/// };
/// let json = serde_json::to_value(&comment).unwrap();
/// assert!(json.get("line").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewComment {
    /// Path of the file being commented on, relative to the repo root.
    pub path: String,
    /// Line number in the new version of the file, if the issue has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    /// Formatted comment body with severity, message, and deep link.
    pub body: String,
}

/// Strip one leading `"<projectKey>:"` from a SonarCloud component path.
///
/// Only a leading match is stripped; a project key recurring elsewhere in
/// the path is left alone.
fn component_path<'a>(component: &'a str, project_key: &str) -> &'a str {
    component
        .strip_prefix(project_key)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(component)
}

fn comment_body(issue: &Issue, project_key: &str, sonar_url: &str) -> String {
    format!(
        "\u{1f50d} **SonarCloud Issue ({severity})**: {message}\n\n\
         [View in SonarCloud]({sonar_url}/project/issues?id={project_key}&issues={key}&open={key})",
        severity = issue.severity,
        message = issue.message,
        key = issue.key,
    )
}

fn summary_body(count: usize) -> String {
    format!(
        "## SonarCloud Review\n\n\
         Found {count} issues in your code that need to be addressed.\n\n\
         Please review and fix the identified issues to improve your code quality."
    )
}

/// Build the comment list for the issues that touch changed files.
///
/// Issues whose stripped component path is not in `changed_files` are
/// silently dropped. Comments are grouped by file in first-seen order and
/// keep the original issue order within each file; the result is the
/// flattened list in that deterministic order.
pub fn build_comments(
    issues: &[Issue],
    changed_files: &[String],
    project_key: &str,
    sonar_url: &str,
) -> Vec<ReviewComment> {
    let mut grouped: Vec<(&str, Vec<ReviewComment>)> = Vec::new();

    for issue in issues {
        let path = component_path(&issue.component, project_key);
        if !changed_files.iter().any(|f| f == path) {
            continue;
        }
        let comment = ReviewComment {
            path: path.to_string(),
            line: issue.line,
            body: comment_body(issue, project_key, sonar_url),
        };
        match grouped.iter_mut().find(|(file, _)| *file == path) {
            Some((_, comments)) => comments.push(comment),
            None => grouped.push((path, vec![comment])),
        }
    }

    grouped
        .into_iter()
        .flat_map(|(_, comments)| comments)
        .collect()
}

/// Submit one `REQUEST_CHANGES` review covering every in-scope issue.
///
/// Lists the files changed in the pull request, drops issues outside that
/// set, and submits a single review with one inline comment per retained
/// issue. When nothing is retained, logs and returns without creating a
/// review.
///
/// # Errors
///
/// Returns [`ReviewError::Publish`] if listing the changed files or
/// creating the review fails. No retry, no partial fallback.
pub async fn publish_review<H: PullRequestHost>(
    host: &H,
    pr_number: u64,
    issues: &[Issue],
    project_key: &str,
    sonar_url: &str,
) -> Result<(), ReviewError> {
    let changed_files = host.list_changed_files(pr_number).await?;
    let comments = build_comments(issues, &changed_files, project_key, sonar_url);

    if comments.is_empty() {
        eprintln!("No comments to add to PR review - no issues found in PR files");
        return Ok(());
    }

    let summary = summary_body(comments.len());
    host.create_review(pr_number, REQUEST_CHANGES, &summary, &comments)
        .await?;
    eprintln!("Created PR review with {} comments", comments.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(key: &str, component: &str, line: Option<u64>) -> Issue {
        Issue {
            key: key.into(),
            component: component.into(),
            line,
            severity: "MAJOR".into(),
            message: format!("message for {key}"),
        }
    }

    fn changed(files: &[&str]) -> Vec<String> {
        files.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn strips_only_leading_project_key() {
        assert_eq!(component_path("proj:src/a.js", "proj"), "src/a.js");
        assert_eq!(component_path("other:src/a.js", "proj"), "other:src/a.js");
        // key recurring inside the path stays intact
        assert_eq!(component_path("proj:src/proj:x.js", "proj"), "src/proj:x.js");
        assert_eq!(component_path("projextra:src/a.js", "proj"), "projextra:src/a.js");
    }

    #[test]
    fn out_of_scope_issues_are_dropped() {
        let issues = vec![
            issue("A", "proj:src/a.js", Some(1)),
            issue("B", "proj:src/b.js", Some(2)),
        ];
        let comments = build_comments(&issues, &changed(&["src/a.js"]), "proj", "https://sonarcloud.io");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].path, "src/a.js");
    }

    #[test]
    fn all_out_of_scope_yields_empty_list() {
        let issues = vec![issue("A", "proj:src/x.js", Some(1))];
        let comments = build_comments(&issues, &changed(&["src/y.js"]), "proj", "https://sonarcloud.io");
        assert!(comments.is_empty());
    }

    #[test]
    fn comments_group_by_file_preserving_issue_order() {
        let issues = vec![
            issue("A", "proj:file1.js", Some(1)),
            issue("B", "proj:file2.js", Some(2)),
            issue("C", "proj:file1.js", Some(3)),
        ];
        let comments = build_comments(
            &issues,
            &changed(&["file1.js", "file2.js"]),
            "proj",
            "https://sonarcloud.io",
        );
        let order: Vec<_> = comments.iter().map(|c| (c.path.as_str(), c.line)).collect();
        assert_eq!(
            order,
            vec![("file1.js", Some(1)), ("file1.js", Some(3)), ("file2.js", Some(2))]
        );
    }

    #[test]
    fn body_contains_severity_message_and_deep_link() {
        let issues = vec![issue("AY42", "proj:src/a.js", Some(5))];
        let comments = build_comments(&issues, &changed(&["src/a.js"]), "proj", "https://sonarcloud.io");
        let body = &comments[0].body;
        assert!(body.contains("SonarCloud Issue (MAJOR)"));
        assert!(body.contains("message for AY42"));
        assert!(body.contains(
            "https://sonarcloud.io/project/issues?id=proj&issues=AY42&open=AY42"
        ));
    }

    #[test]
    fn missing_line_is_omitted_from_payload() {
        let issues = vec![issue("A", "proj:src/a.js", None)];
        let comments = build_comments(&issues, &changed(&["src/a.js"]), "proj", "https://sonarcloud.io");
        assert_eq!(comments[0].line, None);
        let json = serde_json::to_value(&comments[0]).unwrap();
        assert!(json.get("line").is_none());
        assert_eq!(json["path"], "src/a.js");
    }

    #[test]
    fn summary_states_comment_count() {
        let summary = summary_body(3);
        assert!(summary.contains("## SonarCloud Review"));
        assert!(summary.contains("Found 3 issues"));
    }
}
