//! CLI argument parsing and credential resolution.
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    config::{self, Config},
    error::HeraldError,
    forge::config::RemoteConfig,
    result::Result,
};

/// Global CLI arguments for credentials, hosts, and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value = "github.com", global = true)]
    /// GitHub host. Set for GitHub Enterprise instances.
    pub github_host: String,

    #[arg(long, default_value = "", global = true)]
    /// Jira server URL (https://issues.example.com). Overrides herald.toml.
    pub jira_server: String,

    #[arg(long, default_value = "", global = true)]
    /// Jira personal access token. Falls back to the token file or the
    /// JIRA_TOKEN env var.
    pub jira_token: String,

    #[arg(short = 't', long, global = true)]
    /// Path to a local file containing the Jira personal access token.
    pub token_file: Option<PathBuf>,

    #[arg(long, global = true)]
    /// Path to a herald.toml configuration file.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release bookkeeping subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare release tags across repositories and file a verification
    /// issue with the tracker.
    Report(ReportArgs),

    /// Transition resolved issues to the QA handover state.
    MoveToQa(MoveToQaArgs),

    /// Report release-ack state for issues.
    CheckAcks(CheckAcksArgs),

    /// List the issues attached to a release.
    ReleaseIssues(ReleaseIssuesArgs),
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    #[arg(long)]
    /// Component name, used in the tracker issue summary.
    pub component: String,

    #[arg(long)]
    /// Downstream release the report is for.
    pub target_release: String,

    #[arg(long, default_value = "")]
    /// GitHub organization owning the compared repositories. Overrides
    /// herald.toml.
    pub org: String,

    #[arg(long, value_delimiter = ',')]
    /// PR labels that select changes for the report (comma delimited).
    pub labels: Vec<String>,

    #[arg(long, default_value = "")]
    /// Repositories as JSON:
    /// [{"repo_name":..,"previous_release":..,"target_release":..}].
    /// Falls back to the REPOS env var, then to herald.toml [[repo]] tables.
    pub repos: String,

    #[arg(long)]
    /// Tracker project key for the new issue.
    pub jira_project: Option<String>,

    #[arg(long, value_delimiter = ',')]
    /// Tracker labels to add to the new issue (comma delimited).
    pub jira_labels: Vec<String>,

    #[arg(long)]
    /// Tracker issue type (e.g. Story, Task).
    pub jira_issue_type: Option<String>,

    #[arg(long)]
    /// Tracker priority for the new issue.
    pub jira_priority: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Snapshot code host results on disk to cut API calls across
    /// consecutive local runs. Delete the snapshot file to refresh.
    pub dev_cache: bool,
}

#[derive(clap::Args, Debug)]
pub struct MoveToQaArgs {
    #[arg(short = 'i', long = "issue", required = true)]
    /// Issue key to transition, e.g. "RHODS-2001". Repeatable.
    pub issues: Vec<String>,

    #[arg(short = 'f', long)]
    /// The version the issues were addressed in.
    pub fix_version: String,

    #[arg(short = 'b', long)]
    /// The specific build the issues were addressed in.
    pub build: String,
}

#[derive(clap::Args, Debug)]
pub struct CheckAcksArgs {
    #[arg(short = 'i', long = "issue", required = true)]
    /// Issue key to check, e.g. "RHODS-2001". Repeatable.
    pub issues: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ReleaseIssuesArgs {
    #[arg(short = 'r', long)]
    /// The release to list issues for.
    pub release: String,

    #[arg(short = 'p', long)]
    /// Tracker project to query. Defaults to the configured project.
    pub project: Option<String>,

    #[arg(short = 's', long)]
    /// Issue status to query. Defaults to "Resolved".
    pub status: Option<String>,
}

impl Args {
    /// Configure the code host connection from CLI arguments with env
    /// fallback for the token.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        let mut token = self.github_token.clone();

        if token.is_empty()
            && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(HeraldError::InvalidArgs(
                "must set github token".to_string(),
            ));
        }

        Ok(RemoteConfig {
            host: self.github_host.clone(),
            scheme: "https".to_string(),
            token: SecretString::from(token),
        })
    }

    /// Resolve the Jira token: explicit flag, then token file, then the
    /// JIRA_TOKEN env var.
    pub fn get_jira_token(&self) -> Result<SecretString> {
        if !self.jira_token.is_empty() {
            return Ok(SecretString::from(self.jira_token.clone()));
        }

        if let Some(path) = &self.token_file {
            return config::read_token_file(path);
        }

        if let Ok(env_var_token) = env::var("JIRA_TOKEN")
            && !env_var_token.is_empty()
        {
            return Ok(SecretString::from(env_var_token));
        }

        Err(HeraldError::InvalidArgs(
            "must set jira token via --jira-token, --token-file, or JIRA_TOKEN"
                .to_string(),
        ))
    }

    /// Resolve the Jira server URL: CLI flag over config file.
    pub fn get_jira_server(&self, config: &Config) -> Result<String> {
        if !self.jira_server.is_empty() {
            return Ok(self.jira_server.clone());
        }

        if !config.jira.server.is_empty() {
            return Ok(config.jira.server.clone());
        }

        Err(HeraldError::InvalidArgs(
            "must set jira server via --jira-server or herald.toml"
                .to_string(),
        ))
    }
}
