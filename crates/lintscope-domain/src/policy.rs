use lintscope_types::{InvocationMode, RevisionRef, ids};

/// Which rule picks a branch among the candidates found at one ancestor distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// develop > master > feature/* > release/*; other branches never match.
    NamedPriority,
    /// Last candidate in git's (sorted) output; any branch matches.
    LastSorted,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::NamedPriority => "named-priority",
            StrategyKind::LastSorted => "last-sorted",
        }
    }
}

/// What to return when the ancestor walk finds nothing within its bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Resolve to `<head>@{upstream}`.
    UpstreamFallback,
    /// Fail with `Unresolved`.
    Unresolved,
}

impl ExhaustionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ExhaustionPolicy::UpstreamFallback => "upstream",
            ExhaustionPolicy::Unresolved => "unresolved",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverPolicy {
    pub strategy: StrategyKind,
    pub on_exhaustion: ExhaustionPolicy,
    /// Deepest ancestor inspected. Always within `1..=MAX_WALK_DEPTH`.
    pub max_depth: u32,
    /// Remote holding the CI base branch and the fallback for explicit bases.
    pub remote: String,
}

impl ResolverPolicy {
    pub fn new(strategy: StrategyKind, on_exhaustion: ExhaustionPolicy) -> Self {
        Self {
            strategy,
            on_exhaustion,
            max_depth: ids::MAX_WALK_DEPTH,
            remote: ids::DEFAULT_REMOTE.to_string(),
        }
    }

    /// Clamp a requested depth into the supported walk bound.
    pub fn clamp_depth(depth: u32) -> u32 {
        depth.clamp(1, ids::MAX_WALK_DEPTH)
    }
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self::new(StrategyKind::NamedPriority, ExhaustionPolicy::Unresolved)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanPolicy {
    /// File extensions (without the dot) handed to the checker. Empty keeps everything.
    pub extensions: Vec<String>,
    /// Globs, anchored at the scope root, whose change forces a whole-tree run.
    /// `*` does not cross `/`; prefix with `**/` to match at any depth.
    pub sentinels: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub head: RevisionRef,
    /// Forced mode; `None` lets the environment decide.
    pub mode: Option<InvocationMode>,
    pub resolver: ResolverPolicy,
    pub plan: PlanPolicy,
    /// Per git invocation; 0 disables the timeout.
    pub timeout_ms: u64,
    /// Check an operator-supplied base with `git rev-parse --verify` first.
    pub validate_explicit: bool,
}
