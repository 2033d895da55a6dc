//! Release bookkeeping between a GitHub organization and a Jira tracker.
//!
//! The core is the release-delta aggregation pipeline in [`delta`]:
//! compare two release references per repository, resolve and deduplicate
//! the pull requests behind the commits in range, filter them by label,
//! and render one report document that is filed as a tracker issue. The
//! [`command`] modules add the surrounding workflows: QA handover
//! transitions, release-ack checks, and release issue listings.

pub mod cli;
pub mod command;
pub mod config;
pub mod delta;
pub mod error;
pub mod forge;
pub mod result;
pub mod tracker;

pub use result::Result;

#[cfg(test)]
pub mod test_helpers;
