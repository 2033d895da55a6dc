//! Code host query interface.
//!
//! Provides token-based authentication and the read-only queries the
//! release-delta pipeline needs: comparing two release references and
//! resolving the pull requests associated with a commit.

/// Configuration and authentication for the code host connection.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Common trait for code host abstraction.
pub mod traits;

/// Shared data types for commits and pull requests.
pub mod types;
