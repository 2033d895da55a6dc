//! Release delta report command implementation.
//!
//! Drives the full pipeline: resolve inputs, aggregate the per-repository
//! deltas, render the report document, and file exactly one tracker issue
//! with it. Everything before the final submit is read-only and safe to
//! re-run; the submit is the single terminal write and is never retried.

use log::*;
use std::{collections::HashSet, env, sync::Arc};

use crate::{
    cli::{Args, ReportArgs},
    config::{self, Config},
    delta::{
        aggregator::{Aggregator, DeltaSource},
        cache::{DEFAULT_SNAPSHOT_PATH, SnapshotCache},
        render,
        types::{DeltaOutcome, DeltaReport, RepoSpec},
    },
    error::HeraldError,
    forge::github::Github,
    result::Result,
    tracker::{jira::Jira, traits::Tracker, types::NewIssue},
};

/// Inputs for one report run after CLI and config resolution.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub specs: Vec<RepoSpec>,
    pub allowed_labels: HashSet<String>,
    pub body: String,
    pub summary: String,
    pub project: String,
    pub issue_type: String,
    pub priority: String,
    pub issue_labels: Vec<String>,
}

/// Resolve the repositories under comparison: `--repos` JSON first, then
/// the REPOS env var, then `[[repo]]` tables from the config file.
fn resolve_specs(
    report_args: &ReportArgs,
    config: &Config,
) -> Result<Vec<RepoSpec>> {
    let org = if !report_args.org.is_empty() {
        report_args.org.clone()
    } else {
        config.github.org.clone()
    };

    if org.is_empty() {
        return Err(HeraldError::InvalidArgs(
            "must set github org via --org or herald.toml".to_string(),
        ));
    }

    let entries = if !report_args.repos.is_empty() {
        config::parse_repos_json(&report_args.repos)?
    } else if let Ok(json) = env::var("REPOS")
        && !json.is_empty()
    {
        config::parse_repos_json(&json)?
    } else {
        config.repos.clone()
    };

    if entries.is_empty() {
        return Err(HeraldError::invalid_config(
            "no repositories specified: pass --repos, set REPOS, or add [[repo]] tables to herald.toml",
        ));
    }

    Ok(entries
        .into_iter()
        .map(|entry| entry.into_spec(&org))
        .collect())
}

/// Resolve the PR label allow-list. An empty allow-list is legal and
/// admits nothing; it is called out loudly since the report will be empty.
fn resolve_allowed_labels(
    report_args: &ReportArgs,
    config: &Config,
) -> HashSet<String> {
    let labels = if !report_args.labels.is_empty() {
        report_args.labels.clone()
    } else {
        config.report.filter_labels.clone()
    };

    if labels.is_empty() {
        warn!("empty PR filter label set: no pull requests will qualify");
    }

    labels.into_iter().collect()
}

fn build_summary(component: &str, target_release: &str) -> String {
    format!(
        "Verify Component {component} changes for release {target_release}"
    )
}

/// Resolve all report inputs, CLI flags winning over config file values.
pub fn resolve_settings(
    report_args: &ReportArgs,
    config: &Config,
) -> Result<ReportSettings> {
    Ok(ReportSettings {
        specs: resolve_specs(report_args, config)?,
        allowed_labels: resolve_allowed_labels(report_args, config),
        body: config.report.body.clone(),
        summary: build_summary(
            &report_args.component,
            &report_args.target_release,
        ),
        project: report_args
            .jira_project
            .clone()
            .unwrap_or_else(|| config.jira.project.clone()),
        issue_type: report_args
            .jira_issue_type
            .clone()
            .unwrap_or_else(|| config.jira.issue_type.clone()),
        priority: report_args
            .jira_priority
            .clone()
            .unwrap_or_else(|| config.jira.priority.clone()),
        issue_labels: if report_args.jira_labels.is_empty() {
            config.jira.labels.clone()
        } else {
            report_args.jira_labels.clone()
        },
    })
}

/// Surface failed comparisons distinctly from repositories that simply had
/// no qualifying pull requests.
fn summarize_failures(report: &DeltaReport) {
    for delta in report.repos.iter() {
        if let DeltaOutcome::Failed { reason } = &delta.outcome {
            warn!(
                "{}: comparison failed, repository omitted from report: {reason}",
                delta.spec.full_name()
            );
        }
    }
}

/// Aggregate, render, and submit. Returns the key of the created issue.
pub async fn run(
    source: &dyn DeltaSource,
    tracker: &dyn Tracker,
    settings: ReportSettings,
) -> Result<String> {
    let report = source
        .collect(settings.specs, settings.allowed_labels)
        .await?;

    summarize_failures(&report);

    let rendered = render::render_report(&report, &settings.body)?;

    println!("{rendered}");

    let issue = NewIssue {
        project: settings.project,
        summary: settings.summary,
        description: rendered,
        issue_type: settings.issue_type,
        labels: settings.issue_labels,
        priority: settings.priority,
    };

    tracker.create_issue(issue).await
}

/// Resolve inputs, build clients, and run the report workflow.
pub async fn execute(args: &Args, report_args: &ReportArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let settings = resolve_settings(report_args, &config)?;
    let remote = args.get_remote()?;
    let jira_server = args.get_jira_server(&config)?;
    let jira_token = args.get_jira_token()?;

    let forge = Github::new(remote)?;
    let tracker = Jira::new(&jira_server, &jira_token)?;

    let aggregator = Aggregator::new(Arc::new(forge));

    let source: Box<dyn DeltaSource> = if report_args.dev_cache {
        Box::new(SnapshotCache::new(aggregator, DEFAULT_SNAPSHOT_PATH))
    } else {
        Box::new(aggregator)
    };

    let key = run(source.as_ref(), &tracker, settings).await?;

    println!("{key}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        delta::{
            aggregator::MockDeltaSource, render::DEFAULT_REPORT_BODY,
            types::RepoDelta,
        },
        test_helpers,
        tracker::traits::MockTracker,
    };

    fn report_args() -> ReportArgs {
        ReportArgs {
            component: "dashboard".to_string(),
            target_release: "1.32.0".to_string(),
            org: "test-org".to_string(),
            labels: vec!["verify".to_string()],
            repos: r#"[{
                "repo_name": "widgets",
                "previous_release": "v1.0.0",
                "target_release": "v1.1.0"
            }]"#
            .to_string(),
            jira_project: None,
            jira_labels: vec![],
            jira_issue_type: None,
            jira_priority: None,
            dev_cache: false,
        }
    }

    fn settings() -> ReportSettings {
        resolve_settings(&report_args(), &Config::default()).unwrap()
    }

    #[test]
    fn resolves_specs_from_repos_json() {
        let resolved = settings();

        assert_eq!(resolved.specs.len(), 1);
        assert_eq!(resolved.specs[0].full_name(), "test-org/widgets");
        assert!(resolved.allowed_labels.contains("verify"));
        assert_eq!(
            resolved.summary,
            "Verify Component dashboard changes for release 1.32.0"
        );
    }

    #[test]
    fn cli_metadata_overrides_config() {
        let mut args = report_args();
        args.jira_project = Some("OTHER".to_string());
        args.jira_priority = Some("Blocker".to_string());

        let resolved =
            resolve_settings(&args, &Config::default()).unwrap();
        assert_eq!(resolved.project, "OTHER");
        assert_eq!(resolved.priority, "Blocker");
        // unset fields fall back to config defaults
        assert_eq!(resolved.issue_type, "Story");
    }

    #[test]
    fn missing_org_is_an_error() {
        let mut args = report_args();
        args.org = "".to_string();

        let result = resolve_settings(&args, &Config::default());
        assert!(matches!(result, Err(HeraldError::InvalidArgs(_))));
    }

    #[test]
    fn missing_repos_everywhere_is_an_error() {
        let mut args = report_args();
        args.repos = "".to_string();

        // no REPOS env var set in tests, config has no [[repo]] tables
        let result = resolve_specs(&args, &Config::default());
        assert!(matches!(result, Err(HeraldError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn run_submits_the_rendered_report_once() {
        let delta_report = DeltaReport {
            repos: vec![RepoDelta::collected(
                test_helpers::create_test_repo_spec("widgets"),
                vec![test_helpers::create_test_pull_request(
                    1,
                    "Fix the flux capacitor",
                    &["verify"],
                )],
            )],
        };

        let expected_description =
            render::render_report(&delta_report, DEFAULT_REPORT_BODY)
                .unwrap();

        let mut mock_source = MockDeltaSource::new();
        mock_source
            .expect_collect()
            .times(1)
            .returning(move |_, _| Ok(delta_report.clone()));

        let mut mock_tracker = MockTracker::new();
        mock_tracker
            .expect_create_issue()
            .times(1)
            .withf(move |issue| {
                issue.description == expected_description
                    && issue.project == "RHODS"
                    && issue.summary
                        == "Verify Component dashboard changes for release 1.32.0"
            })
            .returning(|_| Ok("RHODS-100".to_string()));

        let key = run(&mock_source, &mock_tracker, settings())
            .await
            .unwrap();
        assert_eq!(key, "RHODS-100");
    }

    #[tokio::test]
    async fn submit_failure_is_terminal() {
        let delta_report = DeltaReport { repos: vec![] };

        let mut mock_source = MockDeltaSource::new();
        mock_source
            .expect_collect()
            .times(1)
            .returning(move |_, _| Ok(delta_report.clone()));

        let mut mock_tracker = MockTracker::new();
        mock_tracker
            .expect_create_issue()
            .times(1)
            .returning(|_| Err(HeraldError::tracker("create failed")));

        let result = run(&mock_source, &mock_tracker, settings()).await;
        assert!(matches!(result, Err(HeraldError::TrackerError(_))));
    }

    #[tokio::test]
    async fn aggregation_failure_skips_submission() {
        let mut mock_source = MockDeltaSource::new();
        mock_source
            .expect_collect()
            .times(1)
            .returning(|_, _| Err(HeraldError::forge("worker pool error")));

        // no create_issue expectation: submission must not happen
        let mock_tracker = MockTracker::new();

        let result = run(&mock_source, &mock_tracker, settings()).await;
        assert!(result.is_err());
    }
}
