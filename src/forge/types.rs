use serde::{Deserialize, Serialize};

/// Represents a commit in a comparison range. Only the identity is carried:
/// commits are keys for pull request resolution, never rendered directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeCommit {
    pub sha: String,
}

/// A pull request as reported by the code host.
///
/// `number` is the stable identity within a repository: the same PR is
/// recognized once even when it is reachable from multiple commits in a
/// comparison range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub labels: Vec<String>,
}
