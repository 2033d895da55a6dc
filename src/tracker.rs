//! Issue tracker interface.
//!
//! Provides token-based authentication and the small set of issue-tracker
//! operations the workflows need: creating the report issue, reading issue
//! state, and driving workflow transitions.

/// Jira REST API client implementation.
pub mod jira;

/// Common trait for issue tracker abstraction.
pub mod traits;

/// Shared data types for issues and transitions.
pub mod types;
