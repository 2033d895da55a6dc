//! Traits related to remote code hosts
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    forge::types::{ForgeCommit, PullRequest},
    result::Result,
};

/// Read-only queries against a code host.
///
/// Both operations are idempotent and safe to re-run; the pipeline retries
/// them on transient failures.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Ordered commits reachable from `target` but not from `previous`
    /// (a standard two-dot range). Fails with
    /// [`HeraldError::ReferenceNotFound`](crate::error::HeraldError) when
    /// either reference does not resolve in the repository.
    async fn compare(
        &self,
        owner: &str,
        repo: &str,
        previous: &str,
        target: &str,
    ) -> Result<Vec<ForgeCommit>>;

    /// Pull requests whose merge history includes the commit. Zero, one,
    /// or more than one PR may reference the same commit.
    async fn pull_requests_for_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<PullRequest>>;
}
