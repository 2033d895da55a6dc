//! Configuration loading and parsing for `herald.toml` files.
//!
//! All configuration is resolved once at process start into an explicit
//! [`Config`] value passed down to each component; there is no process-wide
//! mutable configuration. CLI flags override file values, and configuration
//! errors abort before any network call.
use log::*;
use secrecy::SecretString;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::{
    delta::{render::DEFAULT_REPORT_BODY, types::RepoSpec},
    error::HeraldError,
    result::Result,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "herald.toml";
/// Default tracker project queried and filed against.
pub const DEFAULT_JIRA_PROJECT: &str = "RHODS";
/// Default issue type for report issues.
pub const DEFAULT_ISSUE_TYPE: &str = "Story";
/// Default priority for report issues.
pub const DEFAULT_PRIORITY: &str = "Normal";
/// Default status filter for release issue queries.
pub const DEFAULT_SEARCH_STATUS: &str = "Resolved";
/// Release-ack custom field id on the tracker.
pub const DEFAULT_ACK_FIELD: &str = "customfield_12311241";
/// Fixed-in-build custom field id set during the QA handover.
pub const DEFAULT_FIXED_IN_BUILD_FIELD: &str = "customfield_12318450";
/// Transition id moving a resolved issue to the QA handover state.
pub const DEFAULT_QA_TRANSITION_ID: &str = "791";

/// Code host settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct GithubConfig {
    /// GitHub host (e.g., "github.com").
    pub host: String,
    /// Organization owning the compared repositories.
    pub org: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            org: "".to_string(),
        }
    }
}

/// Issue tracker settings, including the tracker-specific custom field and
/// transition ids the workflows depend on.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Tracker server URL (e.g., "https://issues.example.com").
    pub server: String,
    /// Project key for created and queried issues.
    pub project: String,
    /// Issue type for report issues.
    pub issue_type: String,
    /// Priority for report issues.
    pub priority: String,
    /// Labels added to report issues.
    pub labels: Vec<String>,
    /// Custom field id holding the release-ack marker.
    pub ack_field: String,
    /// Custom field id recording the build an issue was fixed in.
    pub fixed_in_build_field: String,
    /// Transition id for the QA handover.
    pub qa_transition_id: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            server: "".to_string(),
            project: DEFAULT_JIRA_PROJECT.to_string(),
            issue_type: DEFAULT_ISSUE_TYPE.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            labels: vec![],
            ack_field: DEFAULT_ACK_FIELD.to_string(),
            fixed_in_build_field: DEFAULT_FIXED_IN_BUILD_FIELD.to_string(),
            qa_transition_id: DEFAULT_QA_TRANSITION_ID.to_string(),
        }
    }
}

/// Report generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report body template using Tera syntax.
    pub body: String,
    /// PR labels that select changes for the report.
    pub filter_labels: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            body: DEFAULT_REPORT_BODY.to_string(),
            filter_labels: vec![],
        }
    }
}

/// One repository under comparison, in the shape the original `REPOS`
/// JSON used.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoEntry {
    pub repo_name: String,
    pub previous_release: String,
    pub target_release: String,
}

impl RepoEntry {
    /// Qualify the entry with the organization it belongs to.
    pub fn into_spec(self, org: &str) -> RepoSpec {
        RepoSpec {
            owner: org.to_string(),
            repo: self.repo_name,
            previous: self.previous_release,
            target: self.target_release,
        }
    }
}

/// Root configuration structure for `herald.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Code host settings.
    pub github: GithubConfig,
    /// Issue tracker settings.
    pub jira: JiraConfig,
    /// Report generation settings.
    pub report: ReportConfig,
    /// Repositories to compare (supports `[[repo]]` tables).
    #[serde(rename = "repo")]
    pub repos: Vec<RepoEntry>,
}

impl Config {
    /// Load configuration. An explicitly named file must exist; otherwise
    /// `herald.toml` is used when present and defaults apply when not.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path).map_err(|err| {
                HeraldError::invalid_config(format!(
                    "cannot read config file {}: {err}",
                    path.display()
                ))
            })?;
            return Ok(toml::from_str(&content)?);
        }

        if let Ok(content) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
            return Ok(toml::from_str(&content)?);
        }

        info!("no configuration file found: using defaults");
        Ok(Config::default())
    }
}

/// Parse a repositories specification in the original JSON shape:
/// `[{"repo_name": .., "previous_release": .., "target_release": ..}]`.
pub fn parse_repos_json(json: &str) -> Result<Vec<RepoEntry>> {
    serde_json::from_str(json).map_err(|err| {
        HeraldError::invalid_config(format!(
            "malformed repos specification: {err}"
        ))
    })
}

/// Read a tracker personal access token from a local file, trimming
/// surrounding whitespace.
pub fn read_token_file(path: &Path) -> Result<SecretString> {
    let content = fs::read_to_string(path).map_err(|err| {
        HeraldError::invalid_config(format!(
            "cannot read token file {}: {err}",
            path.display()
        ))
    })?;

    let token = content.trim();

    if token.is_empty() {
        return Err(HeraldError::invalid_config(format!(
            "token file {} is empty",
            path.display()
        )));
    }

    Ok(SecretString::from(token.to_string()))
}
