//! Traits related to remote issue trackers
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    result::Result,
    tracker::types::{Issue, NewIssue, Transition},
};

/// Issue tracker operations.
///
/// `create_issue` is the single terminal write of a report run and is never
/// retried; the remaining operations are read-only or per-issue workflow
/// moves.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Create one new issue and return its key.
    async fn create_issue(&self, issue: NewIssue) -> Result<String>;

    /// Fetch an issue's current state and fields.
    async fn get_issue(&self, key: &str) -> Result<Issue>;

    /// Transitions available from the issue's current state.
    async fn list_transitions(&self, key: &str) -> Result<Vec<Transition>>;

    /// Apply a transition, optionally setting fields in the same move.
    async fn transition_issue(
        &self,
        key: &str,
        transition_id: &str,
        fields: serde_json::Value,
    ) -> Result<()>;

    /// Issues matching a tracker-native JQL query.
    async fn search_issues(&self, jql: &str) -> Result<Vec<Issue>>;
}
