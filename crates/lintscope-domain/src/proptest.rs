//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Termination of the ancestor walk for any scripted history
//! - Head's own branch never being chosen as its base
//! - Strategy selection rules

use crate::error::{ResolveError, UnresolvedReason};
use crate::policy::{ExhaustionPolicy, ResolverPolicy, StrategyKind};
use crate::resolver::BaseRefResolver;
use crate::strategy::{LastSorted, NamedPriority, SelectionStrategy};
use crate::test_support::ScriptedRepo;
use lintscope_types::{BaseSource, InvocationMode, RevisionRef, ids};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

const HEAD_BRANCH: &str = "topic";

/// Branch names mixing the recognized long-lived names with arbitrary ones.
fn arb_branch() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("refs/heads/develop".to_string()),
        Just("refs/heads/master".to_string()),
        Just(format!("refs/heads/{HEAD_BRANCH}")),
        "[a-z]{1,8}".prop_map(|s| format!("refs/heads/feature/{s}")),
        "[a-z]{1,8}".prop_map(|s| format!("refs/heads/release/{s}")),
        "[a-z]{1,8}".prop_map(|s| format!("refs/heads/{s}")),
    ]
}

/// Sparse history: a few depths with branches, a few that time out.
fn arb_history() -> impl Strategy<Value = (Vec<(u32, Vec<String>)>, Vec<u32>)> {
    (
        prop::collection::vec((1u32..150, prop::collection::vec(arb_branch(), 0..4)), 0..6),
        prop::collection::vec(1u32..150, 0..3),
    )
}

fn arb_strategy() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![Just(StrategyKind::NamedPriority), Just(StrategyKind::LastSorted)]
}

fn arb_exhaustion() -> impl Strategy<Value = ExhaustionPolicy> {
    prop_oneof![
        Just(ExhaustionPolicy::Unresolved),
        Just(ExhaustionPolicy::UpstreamFallback)
    ]
}

fn scripted(history: &[(u32, Vec<String>)], timeouts: &[u32]) -> ScriptedRepo {
    let mut repo = ScriptedRepo::new().with_head_branch(HEAD_BRANCH);
    for (depth, branches) in history {
        let names: Vec<&str> = branches.iter().map(String::as_str).collect();
        repo = repo.with_branches_at(*depth, &names);
    }
    for depth in timeouts {
        repo = repo.with_timeout_at(*depth);
    }
    repo
}

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(fut)
}

// ============================================================================
// Walk properties
// ============================================================================

proptest! {
    #[test]
    fn walk_never_exceeds_clamped_depth(
        (history, timeouts) in arb_history(),
        strategy in arb_strategy(),
        on_exhaustion in arb_exhaustion(),
        max_depth in 0u32..500,
    ) {
        let repo = scripted(&history, &timeouts);
        let mut policy = ResolverPolicy::new(strategy, on_exhaustion);
        policy.max_depth = max_depth;
        let bound = ResolverPolicy::clamp_depth(max_depth);

        let result = block_on(async {
            BaseRefResolver::new(&repo, "/repo", policy)
                .resolve(&RevisionRef::head(), InvocationMode::Interactive)
                .await
        });

        prop_assert!(repo.containment_queries() <= bound as usize);
        prop_assert!(bound <= ids::MAX_WALK_DEPTH);
        match result {
            Ok(resolved) => match resolved.source {
                BaseSource::AncestorWalk { distance } => {
                    prop_assert!(distance >= 1 && distance <= bound);
                    prop_assert_eq!(repo.containment_queries(), distance as usize);
                }
                BaseSource::UpstreamFallback => {
                    prop_assert_eq!(on_exhaustion, ExhaustionPolicy::UpstreamFallback);
                    prop_assert_eq!(repo.containment_queries(), bound as usize);
                }
                other => prop_assert!(false, "unexpected source {:?}", other),
            },
            Err(ResolveError::Unresolved { reason: UnresolvedReason::WalkExhausted { depth } }) => {
                prop_assert_eq!(on_exhaustion, ExhaustionPolicy::Unresolved);
                prop_assert_eq!(depth, bound);
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn head_branch_is_never_its_own_base(
        (history, timeouts) in arb_history(),
        strategy in arb_strategy(),
    ) {
        let repo = scripted(&history, &timeouts);
        let policy = ResolverPolicy::new(strategy, ExhaustionPolicy::Unresolved);

        let result = block_on(async {
            BaseRefResolver::new(&repo, "/repo", policy)
                .resolve(&RevisionRef::head(), InvocationMode::Interactive)
                .await
        });

        if let Ok(resolved) = result {
            prop_assert_ne!(resolved.reference, RevisionRef::local_branch(HEAD_BRANCH));
        }
    }

    #[test]
    fn automated_mode_never_queries_git(name in "[a-z][a-z0-9/_-]{0,20}") {
        let repo = scripted(&[(1, vec!["refs/heads/develop".to_string()])], &[]);
        let resolved = block_on(async {
            BaseRefResolver::new(&repo, "/repo", ResolverPolicy::default())
                .with_external_base(Some(name.clone()))
                .resolve(&RevisionRef::head(), InvocationMode::Automated)
                .await
        });

        let resolved = resolved.expect("automated mode with a base name resolves");
        prop_assert_eq!(resolved.reference.as_str(), format!("refs/remotes/origin/{name}"));
        prop_assert!(repo.issued().is_empty());
    }
}

// ============================================================================
// Strategy properties
// ============================================================================

fn rank(name: &str) -> Option<u8> {
    if name == ids::BRANCH_DEVELOP {
        Some(0)
    } else if name == ids::BRANCH_MASTER {
        Some(1)
    } else if name.starts_with(ids::BRANCH_FEATURE_PREFIX) {
        Some(2)
    } else if name.starts_with(ids::BRANCH_RELEASE_PREFIX) {
        Some(3)
    } else {
        None
    }
}

proptest! {
    #[test]
    fn named_priority_picks_first_of_best_rank(
        names in prop::collection::vec(arb_branch(), 0..8),
    ) {
        let candidates: Vec<RevisionRef> = names.iter().map(RevisionRef::new).collect();
        let chosen = NamedPriority.select(&candidates);

        let best = names.iter().filter_map(|n| rank(n)).min();
        match (best, chosen) {
            (None, None) => {}
            (Some(best), Some(chosen)) => {
                let expected = names
                    .iter()
                    .find(|n| rank(n) == Some(best))
                    .expect("a name has the best rank");
                prop_assert_eq!(chosen.as_str(), expected.as_str());
            }
            (best, chosen) => prop_assert!(false, "rank {:?} but chose {:?}", best, chosen),
        }
    }

    #[test]
    fn last_sorted_picks_last(names in prop::collection::vec(arb_branch(), 0..8)) {
        let candidates: Vec<RevisionRef> = names.iter().map(RevisionRef::new).collect();
        prop_assert_eq!(LastSorted.select(&candidates), candidates.last().cloned());
    }
}
