use clap::Parser;
use miette::{IntoDiagnostic, Result};

use sonar_review::config::{Inputs, RawInputs};
use sonar_review::github::GitHubClient;
use sonar_review::review::publish_review;
use sonar_review::sonar::SonarClient;

#[derive(Parser)]
#[command(
    name = "sonar-review",
    version,
    about = "Post SonarCloud pull-request issues as inline GitHub review comments",
    long_about = "Fetches unresolved SonarCloud issues for a pull request and submits them\n\
                   as a single REQUEST_CHANGES review, one inline comment per issue.\n\n\
                   Every flag falls back to the env var the surrounding CI already sets,\n\
                   so inside GitHub Actions only project-key and sonar-token need wiring.\n\n\
                   Example:\n  \
                     sonar-review --project-key my_org_my-project --pr-number 42"
)]
struct Cli {
    /// SonarCloud project key (falls back to SONAR_PROJECT_KEY)
    #[arg(long)]
    project_key: Option<String>,

    /// SonarCloud API token (falls back to SONAR_TOKEN)
    #[arg(long)]
    sonar_token: Option<String>,

    /// GitHub API token (falls back to GITHUB_TOKEN)
    #[arg(long)]
    github_token: Option<String>,

    /// Pull request number to review (falls back to PR_NUMBER)
    #[arg(long)]
    pr_number: Option<String>,

    /// Repository as owner/name (falls back to GITHUB_REPOSITORY)
    #[arg(long)]
    repo: Option<String>,

    /// Base URL of the SonarCloud / SonarQube instance
    #[arg(long, default_value = "https://sonarcloud.io")]
    sonar_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let inputs = Inputs::resolve(RawInputs {
        project_key: cli.project_key,
        sonar_token: cli.sonar_token,
        github_token: cli.github_token,
        pr_number: cli.pr_number,
        repo: cli.repo,
        sonar_url: cli.sonar_url,
    })
    .into_diagnostic()?;

    eprintln!(
        "Fetching SonarCloud issues for project {}...",
        inputs.project_key
    );

    let sonar = SonarClient::new(&inputs.sonar_token, &inputs.sonar_url);
    let issues = sonar
        .fetch_issues(&inputs.project_key, inputs.pr_number)
        .await
        .into_diagnostic()?;

    if issues.is_empty() {
        eprintln!("No issues found in SonarCloud analysis. Great job!");
        return Ok(());
    }

    eprintln!("Found {} issues to review.", issues.len());

    let github =
        GitHubClient::new(&inputs.github_token, &inputs.owner, &inputs.repo).into_diagnostic()?;
    publish_review(
        &github,
        inputs.pr_number,
        &issues,
        &inputs.project_key,
        &inputs.sonar_url,
    )
    .await
    .into_diagnostic()?;

    Ok(())
}
