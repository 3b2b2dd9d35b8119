//! The `base` and `scope` use cases.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use lintscope_domain::{BaseRefResolver, EffectiveConfig, Planner};
use lintscope_git::{GitExecutor, list_changed_files};
use lintscope_settings::{Environment, LintscopeConfigV1, Overrides, ResolvedConfig};
use lintscope_types::{InvocationMode, LintPlan, ResolvedBase, RevisionRef, ScopeReportV1};
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;

use crate::report::{ReportInput, build_report};

/// Input shared by every use case.
#[derive(Clone, Debug)]
pub struct ScopeInput<'a> {
    /// Repository root; resolution queries run here.
    pub repo_root: &'a Utf8Path,
    /// Directory whose changes are listed. Relative paths are taken from `repo_root`.
    pub scope: Option<&'a Utf8Path>,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub env: &'a Environment,
    /// Operator-pinned base; falls back to the environment's.
    pub explicit_base: Option<String>,
    /// Git binary to spawn instead of `git`.
    pub git_program: Option<Utf8PathBuf>,
    pub cancel: CancellationToken,
}

#[derive(Clone, Debug)]
pub struct BaseOutput {
    pub base: ResolvedBase,
    pub mode: InvocationMode,
    pub head: RevisionRef,
    pub resolved_config: ResolvedConfig,
}

#[derive(Clone, Debug)]
pub struct ScopeOutput {
    pub base: BaseOutput,
    pub scope_root: Utf8PathBuf,
    /// Changed files before planning filtered them.
    pub changed_total: usize,
    pub plan: LintPlan,
    pub report: ScopeReportV1,
}

/// Parse and resolve configuration (empty text means defaults).
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        LintscopeConfigV1::default()
    } else {
        lintscope_settings::parse_config_toml(config_text).context("parse config")?
    };
    lintscope_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Read `lintscope.toml` if present; a missing file is not an error.
pub fn read_config_text(path: &Utf8Path) -> anyhow::Result<String> {
    if !path.exists() {
        tracing::debug!(%path, "no config file; using profile defaults");
        return Ok(String::new());
    }
    std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))
}

/// Determine the base revision to diff against.
pub async fn run_base(input: &ScopeInput<'_>) -> anyhow::Result<BaseOutput> {
    let resolved_config = load_config(input.config_text, input.overrides.clone())?;
    let effective = &resolved_config.effective;
    let git = executor(input, effective);
    let mode = input.env.invocation_mode(effective.mode);

    let resolver = BaseRefResolver::new(&git, input.repo_root, effective.resolver.clone())
        .with_external_base(input.env.base_branch.clone())
        .with_cancellation(input.cancel.clone());

    let explicit = input
        .explicit_base
        .clone()
        .or_else(|| input.env.explicit_base.clone())
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty());

    tracing::debug!(
        profile = %effective.profile,
        mode = mode.as_str(),
        strategy = effective.resolver.strategy.as_str(),
        on_exhaustion = effective.resolver.on_exhaustion.as_str(),
        max_depth = effective.resolver.max_depth,
        explicit = explicit.is_some(),
        "resolving base revision"
    );

    let base = match explicit {
        Some(name) => {
            resolver
                .resolve_explicit(&RevisionRef::new(name), effective.validate_explicit)
                .await
        }
        None => resolver.resolve(&effective.head, mode).await,
    }
    .context("resolve base revision")?;

    Ok(BaseOutput {
        base,
        mode,
        head: effective.head.clone(),
        resolved_config,
    })
}

/// Resolve the base, list changed files under the scope, and plan the lint run.
pub async fn run_scope(input: &ScopeInput<'_>) -> anyhow::Result<ScopeOutput> {
    let started_at = OffsetDateTime::now_utc();

    let base = run_base(input).await?;
    let effective = &base.resolved_config.effective;
    let planner = Planner::from_policy(&effective.plan).context("compile lint plan")?;

    let scope = match input.scope {
        Some(dir) => input.repo_root.join(dir),
        None => input.repo_root.to_path_buf(),
    };
    let scope_root = scope
        .canonicalize_utf8()
        .with_context(|| format!("scope directory does not exist: {scope}"))?;

    let git = executor(input, effective);
    let files = list_changed_files(&git, &base.base.reference, &scope_root)
        .await
        .with_context(|| format!("list files changed since {}", base.base.reference))?;
    let changed_total = files.len();
    let plan = planner.plan(files, &scope_root);

    tracing::info!(
        base = %base.base.reference,
        changed = changed_total,
        plan = plan.kind(),
        "scoped changed files"
    );

    let report = build_report(ReportInput {
        started_at,
        ended_at: OffsetDateTime::now_utc(),
        mode: base.mode,
        scope_root: &scope_root,
        head: &base.head,
        base: &base.base,
        plan: &plan,
        changed_total,
        env: input.env,
    });

    Ok(ScopeOutput {
        base,
        scope_root,
        changed_total,
        plan,
        report,
    })
}

fn executor(input: &ScopeInput<'_>, effective: &EffectiveConfig) -> GitExecutor {
    let git = GitExecutor::new().with_timeout_ms(effective.timeout_ms);
    match &input.git_program {
        Some(program) => git.with_program(program.clone()),
        None => git,
    }
}
