//! Release-ack verification command implementation.
//!
//! Reports, per issue, whether the release-ack custom field carries the
//! "fully acked" marker. Issues that cannot be fetched are reported and
//! collected; the batch always runs to completion.

use log::*;

use crate::{
    cli::{Args, CheckAcksArgs},
    command::common,
    config::{Config, JiraConfig},
    error::HeraldError,
    result::Result,
    tracker::{jira::Jira, traits::Tracker, types::Issue},
};

/// Field value marking an issue as fully acked.
const ACKED_VALUE: &str = "+";

fn is_fully_acked(issue: &Issue, ack_field: &str) -> bool {
    issue
        .fields
        .get(ack_field)
        .and_then(|value| value.as_str())
        == Some(ACKED_VALUE)
}

/// Process the batch, one line of output per issue.
pub async fn run(
    tracker: &dyn Tracker,
    jira: &JiraConfig,
    cmd: &CheckAcksArgs,
) -> Result<()> {
    let keys = common::normalize_issue_keys(&cmd.issues);
    let mut failures: Vec<String> = vec![];

    for key in keys.iter() {
        match tracker.get_issue(key).await {
            Ok(issue) => {
                if is_fully_acked(&issue, &jira.ack_field) {
                    println!("Issue \"{key}\" is fully acked");
                } else {
                    println!("Issue \"{key}\" is NOT fully acked");
                }
            }
            Err(err) => {
                println!("Issue \"{key}\" could not be checked");
                error!("{key}: ack check failed: {err}");
                failures.push(format!("{key}: {err}"));
            }
        }
    }

    if !failures.is_empty() {
        return Err(HeraldError::tracker(format!(
            "{} of {} issue(s) could not be checked: {}",
            failures.len(),
            keys.len(),
            failures.join("; ")
        )));
    }

    Ok(())
}

/// Resolve configuration, build the tracker client, and run the batch.
pub async fn execute(args: &Args, cmd: &CheckAcksArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let jira_server = args.get_jira_server(&config)?;
    let jira_token = args.get_jira_token()?;
    let tracker = Jira::new(&jira_server, &jira_token)?;

    run(&tracker, &config.jira, cmd).await
}
