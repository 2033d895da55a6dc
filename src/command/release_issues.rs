//! Release issue listing command implementation.
//!
//! Queries the tracker for all issues in a project matching a target
//! release and status, and prints one issue key per line.

use log::*;

use crate::{
    cli::{Args, ReleaseIssuesArgs},
    config::{Config, DEFAULT_SEARCH_STATUS, JiraConfig},
    result::Result,
    tracker::{jira::Jira, traits::Tracker},
};

/// Build the tracker-native query for issues in a release.
fn build_query(project: &str, release: &str, status: &str) -> String {
    format!(
        r#"Project={project} AND "Target Release"={release} AND Status="{status}""#
    )
}

/// Run the search and print one key per matching issue.
pub async fn run(
    tracker: &dyn Tracker,
    jira: &JiraConfig,
    cmd: &ReleaseIssuesArgs,
) -> Result<()> {
    let project = cmd
        .project
        .clone()
        .unwrap_or_else(|| jira.project.clone());
    let status = cmd
        .status
        .clone()
        .unwrap_or_else(|| DEFAULT_SEARCH_STATUS.to_string());

    let jql = build_query(&project, &cmd.release, &status);

    debug!("searching issues: {jql}");

    let issues = tracker.search_issues(&jql).await?;

    info!(
        "{} issue(s) in {project} for release {} with status {status}",
        issues.len(),
        cmd.release
    );

    for issue in issues.iter() {
        println!("{}", issue.key);
    }

    Ok(())
}

/// Resolve configuration, build the tracker client, and run the search.
pub async fn execute(args: &Args, cmd: &ReleaseIssuesArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let jira_server = args.get_jira_server(&config)?;
    let jira_token = args.get_jira_token()?;
    let tracker = Jira::new(&jira_server, &jira_token)?;

    run(&tracker, &config.jira, cmd).await
}
