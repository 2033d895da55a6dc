//! Release-delta aggregation pipeline.
//!
//! Compares two release references per repository, resolves the pull
//! requests that produced the commits in each range, filters them by an
//! allow-list of labels, and assembles the results into a single report
//! document grouped by repository.
//!
//! Repositories are independent units of work: a failed comparison is
//! recorded for that repository alone and never aborts the batch.

/// Multi-repository aggregation behind the `DeltaSource` seam.
pub mod aggregator;

/// Optional on-disk snapshot decorator for repeated local runs.
pub mod cache;

/// Per-repository pull request resolution, label filtering, and dedup.
pub mod collector;

/// Deterministic rendering of the aggregate into a report document.
pub mod render;

/// Data types flowing through the pipeline.
pub mod types;
