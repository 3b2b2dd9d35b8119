//! Base reference resolution.
//!
//! Automated mode trusts the base branch handed over by CI. Interactive mode has no such
//! signal and falls back to heuristics, in order:
//!
//! 1. a purely local upstream of head (developer stacking on an unpushed branch);
//! 2. a bounded walk `head~1 ..= head~max_depth`, asking at each step which other branches
//!    contain that commit and letting the selection strategy pick one;
//! 3. the configured exhaustion policy.

use crate::error::{QueryError, ResolveError, UnresolvedReason};
use crate::policy::{ExhaustionPolicy, ResolverPolicy};
use crate::query::{FailureMode, GitQuery, RevisionQuery};
use crate::strategy::{SelectionStrategy, strategy_for};
use camino::Utf8PathBuf;
use lintscope_types::revision::LOCAL_BRANCH_PREFIX;
use lintscope_types::{BaseSource, CommandResult, InvocationMode, ResolvedBase, RevisionRef};
use tokio_util::sync::CancellationToken;

pub struct BaseRefResolver<'a> {
    query: &'a dyn RevisionQuery,
    repo_dir: Utf8PathBuf,
    policy: ResolverPolicy,
    strategy: Box<dyn SelectionStrategy>,
    external_base: Option<String>,
    cancel: CancellationToken,
}

impl<'a> BaseRefResolver<'a> {
    pub fn new(
        query: &'a dyn RevisionQuery,
        repo_dir: impl Into<Utf8PathBuf>,
        mut policy: ResolverPolicy,
    ) -> Self {
        policy.max_depth = ResolverPolicy::clamp_depth(policy.max_depth);
        let strategy = strategy_for(policy.strategy);
        Self {
            query,
            repo_dir: repo_dir.into(),
            policy,
            strategy,
            external_base: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the strategy chosen by the policy.
    pub fn with_strategy(mut self, strategy: Box<dyn SelectionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Base branch name supplied by the CI environment (automated mode only).
    pub fn with_external_base(mut self, name: Option<String>) -> Self {
        self.external_base = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        self
    }

    /// Checked before every git query; cancellation aborts with [`ResolveError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn policy(&self) -> &ResolverPolicy {
        &self.policy
    }

    /// Resolve the base of `head` for the given mode.
    pub async fn resolve(
        &self,
        head: &RevisionRef,
        mode: InvocationMode,
    ) -> Result<ResolvedBase, ResolveError> {
        let resolved = match mode {
            InvocationMode::Automated => self.resolve_automated()?,
            InvocationMode::Interactive => self.resolve_interactive(head).await?,
        };
        tracing::info!(
            reference = %resolved.reference,
            source = resolved.source.as_str(),
            mode = mode.as_str(),
            "resolved base revision"
        );
        Ok(resolved)
    }

    /// Accept an operator-supplied base, optionally checking that it exists.
    ///
    /// A name that is not a local ref is retried as `refs/remotes/<remote>/<name>`.
    pub async fn resolve_explicit(
        &self,
        reference: &RevisionRef,
        validate: bool,
    ) -> Result<ResolvedBase, ResolveError> {
        if !validate {
            return Ok(ResolvedBase::new(reference.clone(), BaseSource::Explicit));
        }

        let remote = RevisionRef::remote_tracking(&self.policy.remote, reference.as_str());
        for candidate in [reference.clone(), remote] {
            self.check_cancelled()?;
            let query = GitQuery::VerifyRef {
                rev: candidate.clone(),
            };
            match self
                .query
                .run(&self.repo_dir, &query, FailureMode::Fatal)
                .await
            {
                Ok(_) => {
                    tracing::info!(reference = %candidate, "using explicit base revision");
                    return Ok(ResolvedBase::new(candidate, BaseSource::Explicit));
                }
                Err(QueryError::RefNotFound { .. }) => {
                    tracing::debug!(reference = %candidate, "explicit base not found");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ResolveError::unresolved(
            UnresolvedReason::ExplicitBaseMissing {
                reference: reference.clone(),
            },
        ))
    }

    fn resolve_automated(&self) -> Result<ResolvedBase, ResolveError> {
        match &self.external_base {
            Some(name) => Ok(ResolvedBase::new(
                RevisionRef::remote_tracking(&self.policy.remote, name),
                BaseSource::ExternalBase,
            )),
            None => Err(ResolveError::unresolved(
                UnresolvedReason::MissingExternalBase,
            )),
        }
    }

    async fn resolve_interactive(&self, head: &RevisionRef) -> Result<ResolvedBase, ResolveError> {
        if let Some(upstream) = self.local_upstream(head).await? {
            return Ok(ResolvedBase::new(upstream, BaseSource::LocalUpstream));
        }

        let head_branch = self.head_branch(head).await?;
        if let Some((distance, reference)) = self.walk(head, head_branch.as_ref()).await? {
            return Ok(ResolvedBase::new(
                reference,
                BaseSource::AncestorWalk { distance },
            ));
        }

        match self.policy.on_exhaustion {
            ExhaustionPolicy::UpstreamFallback => {
                tracing::debug!(
                    depth = self.policy.max_depth,
                    "ancestor walk exhausted; falling back to upstream of head"
                );
                Ok(ResolvedBase::new(
                    head.upstream(),
                    BaseSource::UpstreamFallback,
                ))
            }
            ExhaustionPolicy::Unresolved => Err(ResolveError::unresolved(
                UnresolvedReason::WalkExhausted {
                    depth: self.policy.max_depth,
                },
            )),
        }
    }

    /// Head's upstream when it is a local branch. Remote-tracking upstreams, on any remote,
    /// are judged by their full ref name and never count.
    async fn local_upstream(&self, head: &RevisionRef) -> Result<Option<RevisionRef>, ResolveError> {
        let query = GitQuery::UpstreamOf { rev: head.clone() };
        let Some(out) = self.run_recoverable(&query).await? else {
            return Ok(None);
        };

        let upstream = out.text();
        match upstream.strip_prefix(LOCAL_BRANCH_PREFIX) {
            Some(name) if !name.is_empty() => Ok(Some(RevisionRef::new(upstream))),
            _ => {
                tracing::debug!(upstream, "head has no local-only upstream");
                Ok(None)
            }
        }
    }

    /// Full ref name of head's own branch, excluded from every candidate list.
    async fn head_branch(&self, head: &RevisionRef) -> Result<Option<RevisionRef>, ResolveError> {
        let query = GitQuery::AbbrevRef { rev: head.clone() };
        let name = self
            .run_recoverable(&query)
            .await?
            .map(|out| out.text().to_string())
            .filter(|name| !name.is_empty());
        Ok(name.map(|n| RevisionRef::local_branch(&n)))
    }

    async fn walk(
        &self,
        head: &RevisionRef,
        head_branch: Option<&RevisionRef>,
    ) -> Result<Option<(u32, RevisionRef)>, ResolveError> {
        for distance in 1..=self.policy.max_depth {
            let query = GitQuery::BranchesContaining {
                rev: head.clone(),
                depth: distance,
            };
            let Some(out) = self.run_recoverable(&query).await? else {
                continue;
            };

            let candidates: Vec<RevisionRef> = out
                .lines()
                .map(RevisionRef::new)
                .filter(|c| head_branch != Some(c))
                .collect();
            if candidates.is_empty() {
                continue;
            }

            tracing::debug!(
                distance,
                candidates = candidates.len(),
                strategy = self.strategy.name(),
                "branches containing ancestor"
            );
            if let Some(chosen) = self.strategy.select(&candidates) {
                return Ok(Some((distance, chosen)));
            }
        }
        Ok(None)
    }

    /// Run a query whose failure means "nothing here".
    ///
    /// Non-zero exit, missing refs and timeouts come back as `None`; only a git that cannot
    /// be started is propagated.
    async fn run_recoverable(
        &self,
        query: &GitQuery,
    ) -> Result<Option<CommandResult>, ResolveError> {
        self.check_cancelled()?;
        match self
            .query
            .run(&self.repo_dir, query, FailureMode::Expected)
            .await
        {
            Ok(out) if out.success => Ok(Some(out)),
            Ok(_) => Ok(None),
            Err(err) if err.is_recoverable() => {
                tracing::debug!(error = %err, "treating failed query as no candidate");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn check_cancelled(&self) -> Result<(), ResolveError> {
        if self.cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        Ok(())
    }
}
