//! QA handover command implementation.
//!
//! Moves resolved issues to the "Ready for QA" state, recording the fix
//! version and build in the same transition. Preconditions are checked
//! before any transition call: an issue already in the target state or not
//! yet resolved is skipped with an explicit line, never treated as an
//! error. Only transitions the tracker rejects fail the run.

use log::*;

use crate::{
    cli::{Args, MoveToQaArgs},
    command::common,
    config::{Config, JiraConfig},
    error::HeraldError,
    result::Result,
    tracker::{jira::Jira, traits::Tracker},
};

/// Workflow state issues must be in before the handover.
const RESOLVED_STATE: &str = "Resolved";
/// Workflow state the handover moves issues to.
const QA_STATE: &str = "Ready for QA";

/// How the handover of one issue ended.
#[derive(Debug, PartialEq, Eq)]
enum QaOutcome {
    Transitioned,
    AlreadyInState,
    NotResolved { status: String },
    TransitionUnavailable,
}

/// Check preconditions and, when they hold, apply the QA transition with
/// the fix version and build fields.
async fn transition_to_qa(
    tracker: &dyn Tracker,
    jira: &JiraConfig,
    key: &str,
    fix_version: &str,
    build: &str,
) -> Result<QaOutcome> {
    let issue = tracker.get_issue(key).await?;

    if issue.status == QA_STATE {
        return Ok(QaOutcome::AlreadyInState);
    }

    if issue.status != RESOLVED_STATE {
        return Ok(QaOutcome::NotResolved {
            status: issue.status,
        });
    }

    let transitions = tracker.list_transitions(key).await?;

    if !transitions.iter().any(|t| t.id == jira.qa_transition_id) {
        return Ok(QaOutcome::TransitionUnavailable);
    }

    let mut fields = serde_json::Map::new();
    fields.insert(
        "fixVersions".to_string(),
        serde_json::json!([{ "name": fix_version }]),
    );
    fields.insert(
        jira.fixed_in_build_field.clone(),
        serde_json::json!(build),
    );

    tracker
        .transition_issue(
            key,
            &jira.qa_transition_id,
            serde_json::Value::Object(fields),
        )
        .await?;

    Ok(QaOutcome::Transitioned)
}

/// Process the batch, one line of output per issue. Rejected transitions
/// are collected and reported at the end instead of aborting mid-batch.
pub async fn run(
    tracker: &dyn Tracker,
    jira: &JiraConfig,
    cmd: &MoveToQaArgs,
) -> Result<()> {
    let keys = common::normalize_issue_keys(&cmd.issues);
    let mut failures: Vec<String> = vec![];

    for key in keys.iter() {
        let outcome = transition_to_qa(
            tracker,
            jira,
            key,
            &cmd.fix_version,
            &cmd.build,
        )
        .await;

        match outcome {
            Ok(QaOutcome::Transitioned) => {
                println!("{key} successfully handed over to QA.");
            }
            Ok(QaOutcome::AlreadyInState) => {
                println!(
                    "Issue {key} is already in the \"{QA_STATE}\" state."
                );
            }
            Ok(QaOutcome::NotResolved { status }) => {
                println!(
                    "Issue {key} is currently in the \"{status}\" state, not \"{RESOLVED_STATE}\". Please progress it to \"{RESOLVED_STATE}\" before attempting to progress it to \"{QA_STATE}\"."
                );
            }
            Ok(QaOutcome::TransitionUnavailable) => {
                println!(
                    "Issue {key} cannot be transitioned to the \"{QA_STATE}\" state."
                );
            }
            Err(err) => {
                error!("{key}: transition failed: {err}");
                failures.push(format!("{key}: {err}"));
            }
        }
    }

    if !failures.is_empty() {
        return Err(HeraldError::tracker(format!(
            "{} of {} issue(s) failed: {}",
            failures.len(),
            keys.len(),
            failures.join("; ")
        )));
    }

    Ok(())
}

/// Resolve configuration, build the tracker client, and run the batch.
pub async fn execute(args: &Args, cmd: &MoveToQaArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let jira_server = args.get_jira_server(&config)?;
    let jira_token = args.get_jira_token()?;
    let tracker = Jira::new(&jira_server, &jira_token)?;

    run(&tracker, &config.jira, cmd).await
}
