//! Candidate selection at a single ancestor distance.
//!
//! The walk asks the strategy once per distance, nearest first, and stops at the first
//! `Some`. A strategy therefore never trades distance for a nicer branch name.

use crate::policy::StrategyKind;
use lintscope_types::{RevisionRef, ids};

pub trait SelectionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Pick one of `candidates` (head's own branch already removed), or none.
    fn select(&self, candidates: &[RevisionRef]) -> Option<RevisionRef>;
}

/// Only long-lived branches qualify, ranked develop, master, feature/*, release/*.
#[derive(Clone, Copy, Debug, Default)]
pub struct NamedPriority;

impl NamedPriority {
    fn rank(candidate: &RevisionRef) -> Option<u8> {
        let name = candidate.as_str();
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
}

impl SelectionStrategy for NamedPriority {
    fn name(&self) -> &'static str {
        StrategyKind::NamedPriority.as_str()
    }

    fn select(&self, candidates: &[RevisionRef]) -> Option<RevisionRef> {
        let mut best: Option<(u8, &RevisionRef)> = None;
        for candidate in candidates {
            let Some(rank) = Self::rank(candidate) else {
                continue;
            };
            // Strict `<` keeps the first candidate within a rank.
            if best.is_none_or(|(r, _)| rank < r) {
                best = Some((rank, candidate));
            }
        }
        best.map(|(_, c)| c.clone())
    }
}

/// Any branch qualifies; the last one in git's collating order wins
/// (`feature/...` sorts after `develop`).
#[derive(Clone, Copy, Debug, Default)]
pub struct LastSorted;

impl SelectionStrategy for LastSorted {
    fn name(&self) -> &'static str {
        StrategyKind::LastSorted.as_str()
    }

    fn select(&self, candidates: &[RevisionRef]) -> Option<RevisionRef> {
        candidates.last().cloned()
    }
}

pub fn strategy_for(kind: StrategyKind) -> Box<dyn SelectionStrategy> {
    match kind {
        StrategyKind::NamedPriority => Box::new(NamedPriority),
        StrategyKind::LastSorted => Box::new(LastSorted),
    }
}
