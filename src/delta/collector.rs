//! Per-repository pull request collection.
//!
//! Scans the commits between a repository's two release references in
//! comparison order, resolves the pull requests behind each commit, and
//! keeps the allow-listed ones exactly once in first-seen order.

use log::*;
use std::collections::HashSet;

use crate::{
    delta::types::{PullRequest, RepoSpec},
    forge::traits::Forge,
    result::Result,
};

/// True iff the pull request carries at least one label from the
/// allow-list. Matching is case-sensitive and exact. An empty allow-list
/// admits nothing.
pub fn matches_allowed_labels(
    pr: &PullRequest,
    allowed: &HashSet<String>,
) -> bool {
    if allowed.is_empty() {
        return false;
    }

    pr.labels.iter().any(|label| allowed.contains(label))
}

/// Collect the deduplicated, label-filtered pull requests for one
/// repository. Filtering happens before the dedup set is consulted, so
/// only allow-listed pull requests ever enter it.
pub async fn collect_repo_delta(
    forge: &dyn Forge,
    spec: &RepoSpec,
    allowed: &HashSet<String>,
) -> Result<Vec<PullRequest>> {
    let commits = forge
        .compare(&spec.owner, &spec.repo, &spec.previous, &spec.target)
        .await?;

    debug!(
        "{}: {} commit(s) in {}...{}",
        spec.full_name(),
        commits.len(),
        spec.previous,
        spec.target
    );

    let mut seen: HashSet<u64> = HashSet::new();
    let mut prs: Vec<PullRequest> = vec![];

    for commit in commits.iter() {
        let candidates = forge
            .pull_requests_for_commit(&spec.owner, &spec.repo, &commit.sha)
            .await?;

        for pr in candidates {
            if !matches_allowed_labels(&pr, allowed) {
                continue;
            }

            // Multiple commits in range may resolve to the same pull
            // request; the first sighting wins and fixes its position.
            if seen.contains(&pr.number) {
                continue;
            }

            seen.insert(pr.number);
            prs.push(pr);
        }
    }

    Ok(prs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::HeraldError,
        forge::{traits::MockForge, types::ForgeCommit},
        test_helpers,
    };

    fn allowed(labels: &[&str]) -> HashSet<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn matches_at_least_one_allowed_label() {
        let pr =
            test_helpers::create_test_pull_request(1, "one", &["verify"]);

        assert!(matches_allowed_labels(&pr, &allowed(&["verify", "other"])));
        assert!(!matches_allowed_labels(&pr, &allowed(&["other"])));
    }

    #[test]
    fn empty_allow_list_admits_nothing() {
        let pr =
            test_helpers::create_test_pull_request(1, "one", &["verify"]);

        assert!(!matches_allowed_labels(&pr, &HashSet::new()));
    }

    #[test]
    fn label_matching_is_case_sensitive() {
        let pr =
            test_helpers::create_test_pull_request(1, "one", &["Verify"]);

        assert!(!matches_allowed_labels(&pr, &allowed(&["verify"])));
    }

    #[tokio::test]
    async fn deduplicates_prs_reachable_from_multiple_commits() {
        let spec = test_helpers::create_test_repo_spec("widgets");

        let mut mock_forge = MockForge::new();
        mock_forge.expect_compare().times(1).returning(|_, _, _, _| {
            Ok(vec![
                ForgeCommit { sha: "c1".into() },
                ForgeCommit { sha: "c2".into() },
                ForgeCommit { sha: "c3".into() },
            ])
        });

        // c1 and c3 resolve to PR A (label verify), c2 to PR B (label docs)
        mock_forge.expect_pull_requests_for_commit().times(3).returning(
            |_, _, sha| {
                Ok(match sha {
                    "c2" => vec![test_helpers::create_test_pull_request(
                        2,
                        "B",
                        &["docs"],
                    )],
                    _ => vec![test_helpers::create_test_pull_request(
                        1,
                        "A",
                        &["verify"],
                    )],
                })
            },
        );

        let prs =
            collect_repo_delta(&mock_forge, &spec, &allowed(&["verify"]))
                .await
                .unwrap();

        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].number, 1);
        assert_eq!(prs[0].title, "A");
    }

    #[tokio::test]
    async fn preserves_first_seen_order() {
        let spec = test_helpers::create_test_repo_spec("widgets");

        let mut mock_forge = MockForge::new();
        mock_forge.expect_compare().times(1).returning(|_, _, _, _| {
            Ok(vec![
                ForgeCommit { sha: "c1".into() },
                ForgeCommit { sha: "c2".into() },
            ])
        });

        mock_forge.expect_pull_requests_for_commit().times(2).returning(
            |_, _, sha| {
                Ok(match sha {
                    "c1" => vec![
                        test_helpers::create_test_pull_request(
                            9,
                            "later number first",
                            &["verify"],
                        ),
                    ],
                    _ => vec![test_helpers::create_test_pull_request(
                        3,
                        "earlier number second",
                        &["verify"],
                    )],
                })
            },
        );

        let prs =
            collect_repo_delta(&mock_forge, &spec, &allowed(&["verify"]))
                .await
                .unwrap();

        let numbers: Vec<u64> = prs.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, vec![9, 3]);
    }

    #[tokio::test]
    async fn filtered_prs_never_enter_the_dedup_set() {
        let spec = test_helpers::create_test_repo_spec("widgets");

        let mut mock_forge = MockForge::new();
        mock_forge.expect_compare().times(1).returning(|_, _, _, _| {
            Ok(vec![ForgeCommit { sha: "c1".into() }])
        });

        mock_forge.expect_pull_requests_for_commit().times(1).returning(
            |_, _, _| {
                Ok(vec![test_helpers::create_test_pull_request(
                    1,
                    "A",
                    &["docs"],
                )])
            },
        );

        let prs = collect_repo_delta(&mock_forge, &spec, &HashSet::new())
            .await
            .unwrap();

        assert!(prs.is_empty());
    }

    #[tokio::test]
    async fn unresolvable_reference_propagates() {
        let spec = test_helpers::create_test_repo_spec("widgets");

        let mut mock_forge = MockForge::new();
        mock_forge.expect_compare().times(1).returning(|_, repo, _, _| {
            Err(HeraldError::ReferenceNotFound {
                repo: format!("test-org/{repo}"),
                previous: "v1.0.0".to_string(),
                target: "v1.1.0".to_string(),
            })
        });

        let result =
            collect_repo_delta(&mock_forge, &spec, &allowed(&["verify"]))
                .await;

        assert!(matches!(
            result,
            Err(HeraldError::ReferenceNotFound { .. })
        ));
    }
}
