use serde::{Deserialize, Serialize};

pub use crate::forge::types::PullRequest;

/// One repository under comparison: identity plus the two release
/// references bounding the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSpec {
    pub owner: String,
    pub repo: String,
    pub previous: String,
    pub target: String,
}

impl RepoSpec {
    /// Org-qualified repository name.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// How a repository's delta collection ended. An empty pull request list
/// with `Collected` means nothing in range qualified; `Failed` means the
/// comparison itself did not run to completion. The two must never be
/// conflated when reporting to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaOutcome {
    Collected,
    Failed { reason: String },
}

/// Deduplicated, label-filtered pull requests for one repository, in
/// first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDelta {
    pub spec: RepoSpec,
    pub prs: Vec<PullRequest>,
    pub outcome: DeltaOutcome,
}

impl RepoDelta {
    pub fn collected(spec: RepoSpec, prs: Vec<PullRequest>) -> Self {
        Self {
            spec,
            prs,
            outcome: DeltaOutcome::Collected,
        }
    }

    pub fn failed(spec: RepoSpec, reason: impl Into<String>) -> Self {
        Self {
            spec,
            prs: vec![],
            outcome: DeltaOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, DeltaOutcome::Failed { .. })
    }
}

/// One entry per input repository, in input order. Repositories with zero
/// qualifying pull requests stay in the sequence; rendering decides what
/// to omit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaReport {
    pub repos: Vec<RepoDelta>,
}
