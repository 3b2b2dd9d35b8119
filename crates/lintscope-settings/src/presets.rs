use lintscope_domain::policy::{
    EffectiveConfig, ExhaustionPolicy, PlanPolicy, ResolverPolicy, StrategyKind,
};
use lintscope_types::{RevisionRef, ids};

pub const PROFILE_LOCAL: &str = "local";
pub const PROFILE_CLI: &str = "cli";
pub const PROFILE_CI: &str = "ci";

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        PROFILE_LOCAL => Some(local_profile()),
        PROFILE_CLI => Some(cli_profile()),
        PROFILE_CI => Some(ci_profile()),
        _ => None,
    }
}

fn base(profile: &str, strategy: StrategyKind, on_exhaustion: ExhaustionPolicy) -> EffectiveConfig {
    EffectiveConfig {
        profile: profile.to_string(),
        head: RevisionRef::head(),
        mode: None,
        resolver: ResolverPolicy::new(strategy, on_exhaustion),
        plan: PlanPolicy::default(),
        timeout_ms: ids::DEFAULT_TIMEOUT_MS,
        validate_explicit: true,
    }
}

/// Long-lived branch names only; say so when nothing qualifies.
fn local_profile() -> EffectiveConfig {
    base(
        PROFILE_LOCAL,
        StrategyKind::NamedPriority,
        ExhaustionPolicy::Unresolved,
    )
}

/// Nearest branch of any name, then whatever head tracks.
fn cli_profile() -> EffectiveConfig {
    base(
        PROFILE_CLI,
        StrategyKind::LastSorted,
        ExhaustionPolicy::UpstreamFallback,
    )
}

// Automated mode itself comes from the environment, not from the profile.
fn ci_profile() -> EffectiveConfig {
    base(
        PROFILE_CI,
        StrategyKind::NamedPriority,
        ExhaustionPolicy::Unresolved,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_pick_strategy_and_exhaustion() {
        let local = preset("local").unwrap();
        assert_eq!(local.resolver.strategy, StrategyKind::NamedPriority);
        assert_eq!(local.resolver.on_exhaustion, ExhaustionPolicy::Unresolved);

        let cli = preset("cli").unwrap();
        assert_eq!(cli.resolver.strategy, StrategyKind::LastSorted);
        assert_eq!(cli.resolver.on_exhaustion, ExhaustionPolicy::UpstreamFallback);

        let ci = preset("ci").unwrap();
        assert_eq!(ci.resolver, local.resolver);
        assert_eq!(ci.profile, "ci");
    }

    #[test]
    fn unknown_profile_has_no_preset() {
        assert!(preset("strict").is_none());
    }
}
