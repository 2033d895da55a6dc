//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{FromResponse, Octocrab};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

use crate::{
    error::HeraldError,
    forge::{
        config::{DEFAULT_MAX_ATTEMPTS, RETRY_BASE_DELAY_MS, RemoteConfig},
        traits::Forge,
        types::{ForgeCommit, PullRequest},
    },
    result::Result,
};

#[derive(Debug, Deserialize)]
struct CompareCommit {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    pub commits: Vec<CompareCommit>,
}

#[derive(Debug, Deserialize)]
struct PullLabel {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct PullItem {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<PullLabel>,
}

impl From<PullItem> for PullRequest {
    fn from(item: PullItem) -> Self {
        Self {
            number: item.number,
            title: item.title,
            url: item.html_url,
            labels: item.labels.into_iter().map(|l| l.name).collect(),
        }
    }
}

/// GitHub code host implementation using Octocrab for the comparison and
/// commit-to-pull-request queries.
pub struct Github {
    base_uri: String,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and
    /// API base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = format!("{}://api.{}", config.scheme, config.host);
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri.clone())?;
        let instance = builder.build()?;

        Ok(Self { base_uri, instance })
    }

    /// Run a read-only GET with bounded exponential backoff. Only network
    /// and rate-limit errors are retried; not-found and auth errors
    /// propagate immediately.
    async fn get_with_retry<T: FromResponse>(
        &self,
        endpoint: &str,
    ) -> Result<T> {
        let mut attempt: u32 = 1;

        loop {
            let result: std::result::Result<T, octocrab::Error> =
                self.instance.get(endpoint, None::<&()>).await;

            match result {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let err = HeraldError::from(err);

                    if attempt >= DEFAULT_MAX_ATTEMPTS || !err.is_retryable()
                    {
                        return Err(err);
                    }

                    let delay = Duration::from_millis(
                        RETRY_BASE_DELAY_MS * 2u64.pow(attempt - 1),
                    );

                    warn!(
                        "query failed (attempt {attempt}), retrying in {}ms: {err}",
                        delay.as_millis()
                    );

                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait]
impl Forge for Github {
    async fn compare(
        &self,
        owner: &str,
        repo: &str,
        previous: &str,
        target: &str,
    ) -> Result<Vec<ForgeCommit>> {
        let endpoint = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.base_uri, owner, repo, previous, target
        );

        debug!("comparing {previous}...{target} in {owner}/{repo}");

        match self.get_with_retry::<CompareResponse>(&endpoint).await {
            Ok(response) => Ok(response
                .commits
                .into_iter()
                .map(|c| ForgeCommit { sha: c.sha })
                .collect()),
            Err(HeraldError::NotFound(_)) => {
                Err(HeraldError::ReferenceNotFound {
                    repo: format!("{owner}/{repo}"),
                    previous: previous.to_string(),
                    target: target.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    async fn pull_requests_for_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<PullRequest>> {
        let endpoint = format!(
            "{}/repos/{}/{}/commits/{}/pulls",
            self.base_uri, owner, repo, sha
        );

        let pulls: Vec<PullItem> = self.get_with_retry(&endpoint).await?;

        Ok(pulls.into_iter().map(PullRequest::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers;

    #[tokio::test]
    async fn builds_client_for_configured_host() {
        let github =
            Github::new(test_helpers::create_test_remote_config()).unwrap();
        assert_eq!(github.base_uri, "https://api.github.com");
    }

    #[test]
    fn deserializes_compare_response() {
        let body = r#"{
            "status": "ahead",
            "ahead_by": 2,
            "commits": [
                { "sha": "abc123", "url": "ignored" },
                { "sha": "def456" }
            ]
        }"#;

        let response: CompareResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.commits.len(), 2);
        assert_eq!(response.commits[0].sha, "abc123");
        assert_eq!(response.commits[1].sha, "def456");
    }

    #[test]
    fn deserializes_pull_items_and_converts() {
        let body = r#"[{
            "number": 12,
            "title": "Add feature",
            "html_url": "https://github.com/org/widgets/pull/12",
            "labels": [{ "name": "verify" }, { "name": "bug" }]
        }]"#;

        let pulls: Vec<PullItem> = serde_json::from_str(body).unwrap();
        let pr = PullRequest::from(pulls.into_iter().next().unwrap());

        assert_eq!(pr.number, 12);
        assert_eq!(pr.title, "Add feature");
        assert_eq!(pr.url, "https://github.com/org/widgets/pull/12");
        assert_eq!(pr.labels, vec!["verify", "bug"]);
    }

    #[test]
    fn pull_item_labels_default_to_empty() {
        let body = r#"[{
            "number": 7,
            "title": "No labels",
            "html_url": "https://github.com/org/widgets/pull/7"
        }]"#;

        let pulls: Vec<PullItem> = serde_json::from_str(body).unwrap();
        let pr = PullRequest::from(pulls.into_iter().next().unwrap());
        assert!(pr.labels.is_empty());
    }
}
