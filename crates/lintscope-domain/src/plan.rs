//! Turning a changed-file set into what the checker should run on.

use crate::policy::PlanPolicy;
use camino::Utf8Path;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use lintscope_types::{ChangedFileSet, LintPlan};

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("invalid sentinel glob `{pattern}`: {source}")]
    InvalidSentinel {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to compile sentinel globs: {0}")]
    Build(#[source] globset::Error),
}

#[derive(Debug, Clone)]
pub struct Planner {
    extensions: Vec<String>,
    sentinels: Option<GlobSet>,
}

impl Planner {
    pub fn from_policy(policy: &PlanPolicy) -> Result<Self, PlanError> {
        let extensions = policy
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();

        let sentinels = if policy.sentinels.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &policy.sentinels {
                let glob = GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map_err(|source| PlanError::InvalidSentinel {
                        pattern: pattern.clone(),
                        source,
                    })?;
                builder.add(glob);
            }
            Some(builder.build().map_err(PlanError::Build)?)
        };

        Ok(Self {
            extensions,
            sentinels,
        })
    }

    /// Sentinels are matched against paths relative to `scope_root` and are anchored there:
    /// `*` stops at `/`, so `.eslintrc*` only matches at the top and `**/.eslintrc*` matches
    /// at any depth. The first changed file that matches decides a whole-tree run.
    pub fn plan(&self, files: ChangedFileSet, scope_root: &Utf8Path) -> LintPlan {
        if let Some(set) = &self.sentinels {
            let hit = files.iter().find(|path| {
                let relative = path.strip_prefix(scope_root).unwrap_or(path);
                set.is_match(relative.as_std_path())
            });
            if let Some(sentinel) = hit {
                tracing::info!(%sentinel, "sentinel changed; linting whole tree");
                return LintPlan::WholeTree {
                    sentinel: sentinel.to_path_buf(),
                };
            }
        }

        let total = files.len();
        let kept = if self.extensions.is_empty() {
            files
        } else {
            files.retain(|p| {
                p.extension()
                    .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
            })
        };
        tracing::debug!(total, kept = kept.len(), "filtered changed files by extension");

        if kept.is_empty() {
            LintPlan::Nothing
        } else {
            LintPlan::Files(kept)
        }
    }
}
