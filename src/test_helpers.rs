//! Common test helper functions shared across test modules.
//!
//! This module provides reusable utilities for creating test fixtures,
//! reducing code duplication across different test suites.
use secrecy::SecretString;
use serde_json::json;

use crate::{
    delta::types::RepoSpec,
    forge::{config::RemoteConfig, types::PullRequest},
    tracker::types::{Issue, Transition},
};

/// Creates a test RemoteConfig with sensible defaults.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        scheme: "https".to_string(),
        token: SecretString::from("test-token".to_string()),
    }
}

/// Creates a test RepoSpec under the `test-org` organization comparing
/// v1.0.0 to v1.1.0.
pub fn create_test_repo_spec(repo: &str) -> RepoSpec {
    RepoSpec {
        owner: "test-org".to_string(),
        repo: repo.to_string(),
        previous: "v1.0.0".to_string(),
        target: "v1.1.0".to_string(),
    }
}

/// Creates a test PullRequest with the given number, title, and labels.
pub fn create_test_pull_request(
    number: u64,
    title: &str,
    labels: &[&str],
) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        url: format!("https://github.com/test-org/repo/pull/{}", number),
        labels: labels.iter().map(|l| l.to_string()).collect(),
    }
}

/// Creates a test Issue in the given workflow state, with the status also
/// mirrored into the native field map the way the tracker reports it.
pub fn create_test_issue(key: &str, status: &str) -> Issue {
    let mut fields = serde_json::Map::new();
    fields.insert("status".to_string(), json!({ "name": status }));

    Issue {
        key: key.to_string(),
        status: status.to_string(),
        fields,
    }
}

/// Creates a test Transition with the given id and name.
pub fn create_test_transition(id: &str, name: &str) -> Transition {
    Transition {
        id: id.to_string(),
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_repo_spec() {
        let spec = create_test_repo_spec("widgets");
        assert_eq!(spec.full_name(), "test-org/widgets");
        assert_eq!(spec.previous, "v1.0.0");
        assert_eq!(spec.target, "v1.1.0");
    }

    #[test]
    fn test_create_test_pull_request() {
        let pr = create_test_pull_request(42, "Fix it", &["verify"]);
        assert_eq!(pr.number, 42);
        assert_eq!(pr.url, "https://github.com/test-org/repo/pull/42");
        assert_eq!(pr.labels, vec!["verify"]);
    }

    #[test]
    fn test_create_test_issue() {
        let issue = create_test_issue("RHODS-1", "Resolved");
        assert_eq!(issue.key, "RHODS-1");
        assert_eq!(issue.status, "Resolved");
        assert_eq!(issue.fields["status"]["name"], "Resolved");
    }
}
