//! Command execution and orchestration for release-herald.
//!
//! One module per CLI workflow. Each command follows the same pattern:
//! resolve configuration and credentials (aborting before any network call
//! on configuration errors), build the external clients, then run the
//! workflow against the `Forge`/`Tracker`/`DeltaSource` seams so the core
//! logic stays testable with mocks. Every processed unit of work, whether
//! a repository or an issue, produces one explicit line of output.

/// Shared helpers used across commands.
pub mod common;

/// Release-ack verification for a set of issues.
pub mod check_acks;

/// QA handover transitions for resolved issues.
pub mod move_to_qa;

/// List the issues attached to a release.
pub mod release_issues;

/// The release delta report: compare tags, collect labeled pull requests,
/// file the verification issue.
pub mod report;
