//! Multi-repository aggregation.
//!
//! Fans the per-repository collection out over a bounded worker pool and
//! reassembles the results in input order. Repository computations share no
//! mutable state, so concurrency here is purely a latency optimization
//! against a rate-limited remote API.

use async_trait::async_trait;
use log::*;
#[cfg(test)]
use mockall::automock;
use std::{collections::HashSet, sync::Arc};
use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    delta::{
        collector,
        types::{DeltaReport, PullRequest, RepoDelta, RepoSpec},
    },
    error::HeraldError,
    forge::traits::Forge,
    result::Result,
};

/// Upper bound on concurrently processed repositories.
pub const MAX_CONCURRENT_REPOS: usize = 4;

/// Source of an aggregated delta report. The live aggregator and the
/// on-disk snapshot decorator share this contract.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeltaSource: Send + Sync {
    /// Produce one [`RepoDelta`] per input spec, in input order.
    async fn collect(
        &self,
        specs: Vec<RepoSpec>,
        allowed: HashSet<String>,
    ) -> Result<DeltaReport>;
}

/// Live aggregator driving the code host per repository.
pub struct Aggregator {
    forge: Arc<dyn Forge>,
}

impl Aggregator {
    pub fn new(forge: Arc<dyn Forge>) -> Self {
        Self { forge }
    }
}

#[async_trait]
impl DeltaSource for Aggregator {
    async fn collect(
        &self,
        specs: Vec<RepoSpec>,
        allowed: HashSet<String>,
    ) -> Result<DeltaReport> {
        let total = specs.len();
        let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_REPOS));

        let mut tasks: JoinSet<(usize, RepoSpec, Result<Vec<PullRequest>>)> =
            JoinSet::new();

        for (index, spec) in specs.into_iter().enumerate() {
            let forge = Arc::clone(&self.forge);
            let allowed = allowed.clone();
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        collector::collect_repo_delta(
                            forge.as_ref(),
                            &spec,
                            &allowed,
                        )
                        .await
                    }
                    Err(_) => {
                        Err(HeraldError::forge("repository worker pool closed"))
                    }
                };

                (index, spec, result)
            });
        }

        // Results land in index-addressed slots so output order matches
        // input order regardless of completion order.
        let mut slots: Vec<Option<RepoDelta>> = Vec::with_capacity(total);
        slots.resize_with(total, || None);

        while let Some(joined) = tasks.join_next().await {
            let (index, spec, result) = joined.map_err(|err| {
                HeraldError::forge(format!("repository task failed: {err}"))
            })?;

            let delta = match result {
                Ok(prs) => {
                    info!(
                        "{}: {} qualifying pull request(s) in {}...{}",
                        spec.full_name(),
                        prs.len(),
                        spec.previous,
                        spec.target
                    );
                    RepoDelta::collected(spec, prs)
                }
                Err(err) => {
                    warn!(
                        "{}: comparison failed: {err}",
                        spec.full_name()
                    );
                    RepoDelta::failed(spec, err.to_string())
                }
            };

            slots[index] = Some(delta);
        }

        Ok(DeltaReport {
            repos: slots.into_iter().flatten().collect(),
        })
    }
}
