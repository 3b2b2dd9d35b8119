use crate::{model::LintscopeConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use lintscope_domain::policy::{EffectiveConfig, ExhaustionPolicy, ResolverPolicy, StrategyKind};
use lintscope_types::{InvocationMode, RevisionRef};

/// Values given on the command line; they beat the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub strategy: Option<String>,
    pub on_exhaustion: Option<String>,
    pub max_depth: Option<u32>,
    pub timeout_ms: Option<u64>,
    pub mode: Option<String>,
    pub head: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: LintscopeConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| presets::PROFILE_LOCAL.to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!("unknown profile: {profile} (expected local|cli|ci)")
    })?;

    if let Some(s) = overrides.strategy.as_deref().or(cfg.strategy.as_deref()) {
        effective.resolver.strategy = parse_strategy(s)?;
    }

    if let Some(s) = overrides
        .on_exhaustion
        .as_deref()
        .or(cfg.on_exhaustion.as_deref())
    {
        effective.resolver.on_exhaustion = parse_exhaustion(s)?;
    }

    if let Some(depth) = overrides.max_depth.or(cfg.max_depth) {
        effective.resolver.max_depth = ResolverPolicy::clamp_depth(depth);
    }

    if let Some(ms) = overrides.timeout_ms.or(cfg.timeout_ms) {
        effective.timeout_ms = ms;
    }

    if let Some(remote) = cfg.remote.as_deref() {
        let remote = remote.trim();
        if remote.is_empty() || remote.contains('/') {
            anyhow::bail!("invalid remote name: {remote:?}");
        }
        effective.resolver.remote = remote.to_string();
    }

    if let Some(head) = overrides.head.as_deref().or(cfg.head.as_deref()) {
        let head = head.trim();
        if head.is_empty() {
            anyhow::bail!("head revision must not be empty");
        }
        effective.head = RevisionRef::new(head);
    }

    if let Some(mode) = overrides.mode.as_deref().or(cfg.mode.as_deref()) {
        effective.mode = parse_mode(mode)?;
    }

    if let Some(validate) = cfg.validate_explicit {
        effective.validate_explicit = validate;
    }

    if let Some(extensions) = cfg.extensions {
        effective.plan.extensions = extensions;
    }

    if let Some(sentinels) = cfg.sentinels {
        validate_sentinels(&sentinels)?;
        effective.plan.sentinels = sentinels;
    }

    Ok(ResolvedConfig { effective })
}

fn validate_sentinels(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid sentinel glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_strategy(v: &str) -> anyhow::Result<StrategyKind> {
    match v {
        "named-priority" | "named" => Ok(StrategyKind::NamedPriority),
        "last-sorted" | "last" => Ok(StrategyKind::LastSorted),
        other => {
            anyhow::bail!("unknown strategy: {other} (expected named-priority|last-sorted)")
        }
    }
}

fn parse_exhaustion(v: &str) -> anyhow::Result<ExhaustionPolicy> {
    match v {
        "unresolved" => Ok(ExhaustionPolicy::Unresolved),
        "upstream" => Ok(ExhaustionPolicy::UpstreamFallback),
        other => anyhow::bail!("unknown on_exhaustion: {other} (expected unresolved|upstream)"),
    }
}

fn parse_mode(v: &str) -> anyhow::Result<Option<InvocationMode>> {
    match v {
        "auto" => Ok(None),
        "automated" => Ok(Some(InvocationMode::Automated)),
        "interactive" => Ok(Some(InvocationMode::Interactive)),
        other => anyhow::bail!("unknown mode: {other} (expected auto|automated|interactive)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_local_profile() {
        let resolved = resolve_config(LintscopeConfigV1::default(), Overrides::default()).unwrap();
        let e = resolved.effective;
        assert_eq!(e.profile, "local");
        assert_eq!(e.resolver, ResolverPolicy::default());
        assert_eq!(e.head, RevisionRef::head());
        assert_eq!(e.mode, None);
        assert_eq!(e.timeout_ms, 10_000);
        assert!(e.validate_explicit);
    }

    #[test]
    fn config_file_beats_preset_and_overrides_beat_config() {
        let cfg = LintscopeConfigV1 {
            profile: Some("cli".to_string()),
            strategy: Some("named-priority".to_string()),
            max_depth: Some(20),
            timeout_ms: Some(500),
            ..Default::default()
        };
        let overrides = Overrides {
            max_depth: Some(5),
            ..Default::default()
        };

        let e = resolve_config(cfg, overrides).unwrap().effective;
        assert_eq!(e.profile, "cli");
        assert_eq!(e.resolver.strategy, StrategyKind::NamedPriority);
        assert_eq!(e.resolver.on_exhaustion, ExhaustionPolicy::UpstreamFallback);
        assert_eq!(e.resolver.max_depth, 5);
        assert_eq!(e.timeout_ms, 500);
    }

    #[test]
    fn max_depth_is_clamped() {
        let over = Overrides {
            max_depth: Some(1000),
            ..Default::default()
        };
        let e = resolve_config(LintscopeConfigV1::default(), over).unwrap().effective;
        assert_eq!(e.resolver.max_depth, 99);

        let zero = Overrides {
            max_depth: Some(0),
            ..Default::default()
        };
        let e = resolve_config(LintscopeConfigV1::default(), zero).unwrap().effective;
        assert_eq!(e.resolver.max_depth, 1);
    }

    #[test]
    fn mode_override_parses_auto_as_environment_decided() {
        let cfg = LintscopeConfigV1 {
            mode: Some("interactive".to_string()),
            ..Default::default()
        };
        let e = resolve_config(cfg.clone(), Overrides::default()).unwrap().effective;
        assert_eq!(e.mode, Some(InvocationMode::Interactive));

        let over = Overrides {
            mode: Some("auto".to_string()),
            ..Default::default()
        };
        let e = resolve_config(cfg, over).unwrap().effective;
        assert_eq!(e.mode, None);
    }

    #[test]
    fn unknown_values_are_rejected_with_context() {
        let bad_profile = Overrides {
            profile: Some("strict".to_string()),
            ..Default::default()
        };
        let err = resolve_config(LintscopeConfigV1::default(), bad_profile).unwrap_err();
        assert!(err.to_string().contains("unknown profile: strict"));

        let bad_strategy = LintscopeConfigV1 {
            strategy: Some("newest".to_string()),
            ..Default::default()
        };
        let err = resolve_config(bad_strategy, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unknown strategy: newest"));
    }

    #[test]
    fn invalid_sentinel_glob_is_rejected() {
        let cfg = LintscopeConfigV1 {
            sentinels: Some(vec!["package.json".to_string(), "[".to_string()]),
            ..Default::default()
        };
        let err = resolve_config(cfg, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("invalid sentinel glob: ["));
    }

    #[test]
    fn remote_with_slash_is_rejected() {
        let cfg = LintscopeConfigV1 {
            remote: Some("origin/main".to_string()),
            ..Default::default()
        };
        assert!(resolve_config(cfg, Overrides::default()).is_err());
    }
}
