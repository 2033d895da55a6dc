//! On-disk snapshot of an aggregated delta report.
//!
//! A decorator over [`DeltaSource`] used only to cut API calls during
//! repeated local runs: when the snapshot file exists its contents are
//! returned as-is, otherwise the inner source runs and the result is
//! written out. Deleting the file invalidates the snapshot.

use async_trait::async_trait;
use log::*;
use std::{collections::HashSet, path::PathBuf};
use tokio::fs;

use crate::{
    delta::{
        aggregator::DeltaSource,
        types::{DeltaReport, RepoSpec},
    },
    result::Result,
};

/// Default snapshot location relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = ".herald-snapshot.json";

/// Snapshot decorator around any [`DeltaSource`].
pub struct SnapshotCache<S> {
    inner: S,
    path: PathBuf,
}

impl<S> SnapshotCache<S> {
    pub fn new(inner: S, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: DeltaSource> DeltaSource for SnapshotCache<S> {
    async fn collect(
        &self,
        specs: Vec<RepoSpec>,
        allowed: HashSet<String>,
    ) -> Result<DeltaReport> {
        if fs::try_exists(&self.path).await? {
            let content = fs::read_to_string(&self.path).await?;
            let report: DeltaReport = serde_json::from_str(&content)?;

            info!(
                "loaded delta snapshot from {} ({} repositories), delete the file to refresh",
                self.path.display(),
                report.repos.len()
            );

            return Ok(report);
        }

        let report = self.inner.collect(specs, allowed).await?;

        let serialized = serde_json::to_string_pretty(&report)?;
        fs::write(&self.path, serialized).await?;

        info!("wrote delta snapshot to {}", self.path.display());

        Ok(report)
    }
}
