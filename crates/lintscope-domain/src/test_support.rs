//! A scripted [`RevisionQuery`] for tests: answers from tables, records every query.

use crate::error::QueryError;
use crate::query::{FailureMode, GitQuery, RevisionQuery};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use lintscope_types::CommandResult;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct ScriptedRepo {
    upstream: Option<String>,
    head_branch: Option<String>,
    branches_at: BTreeMap<u32, Vec<String>>,
    timeouts_at: BTreeSet<u32>,
    history_len: Option<u32>,
    existing_refs: BTreeSet<String>,
    diff_output: Option<String>,
    spawn_failure: bool,
    issued: Mutex<Vec<(Utf8PathBuf, GitQuery)>>,
}

impl ScriptedRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full ref name printed for `<head>@{upstream}`.
    pub fn with_upstream(mut self, name: &str) -> Self {
        self.upstream = Some(name.to_string());
        self
    }

    pub fn with_head_branch(mut self, name: &str) -> Self {
        self.head_branch = Some(name.to_string());
        self
    }

    /// Branches listed as containing `head~depth`.
    pub fn with_branches_at(mut self, depth: u32, branches: &[&str]) -> Self {
        self.branches_at
            .insert(depth, branches.iter().map(|b| b.to_string()).collect());
        self
    }

    /// The containment query for `head~depth` times out.
    pub fn with_timeout_at(mut self, depth: u32) -> Self {
        self.timeouts_at.insert(depth);
        self
    }

    /// Ancestors deeper than `len` do not exist.
    pub fn with_history_len(mut self, len: u32) -> Self {
        self.history_len = Some(len);
        self
    }

    pub fn with_existing_refs(mut self, refs: &[&str]) -> Self {
        self.existing_refs
            .extend(refs.iter().map(|r| r.to_string()));
        self
    }

    /// Raw stdout of the diff query.
    pub fn with_diff(mut self, output: &str) -> Self {
        self.diff_output = Some(output.to_string());
        self
    }

    /// Every query fails as if git were not installed.
    pub fn with_spawn_failure(mut self) -> Self {
        self.spawn_failure = true;
        self
    }

    pub fn issued(&self) -> Vec<GitQuery> {
        self.log().iter().map(|(_, q)| q.clone()).collect()
    }

    pub fn issued_with_cwd(&self) -> Vec<(Utf8PathBuf, GitQuery)> {
        self.log().clone()
    }

    pub fn containment_queries(&self) -> usize {
        self.log()
            .iter()
            .filter(|(_, q)| matches!(q, GitQuery::BranchesContaining { .. }))
            .count()
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<(Utf8PathBuf, GitQuery)>> {
        self.issued.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn rejected(query: &GitQuery, failure: FailureMode) -> Result<CommandResult, QueryError> {
        match failure {
            FailureMode::Expected => Ok(CommandResult::failed()),
            FailureMode::Fatal => Err(QueryError::RefNotFound {
                query: query.to_string(),
                stderr: "fatal: scripted rejection".to_string(),
            }),
        }
    }

    fn answer(&self, query: &GitQuery, failure: FailureMode) -> Result<CommandResult, QueryError> {
        if self.spawn_failure {
            return Err(QueryError::ProcessFailure {
                query: query.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "git not found"),
            });
        }

        match query {
            GitQuery::UpstreamOf { .. } => match &self.upstream {
                Some(name) => Ok(CommandResult::ok(format!("{name}\n"))),
                None => Self::rejected(query, failure),
            },
            GitQuery::AbbrevRef { .. } => match &self.head_branch {
                Some(name) => Ok(CommandResult::ok(format!("{name}\n"))),
                None => Self::rejected(query, failure),
            },
            GitQuery::BranchesContaining { depth, .. } => {
                if self.timeouts_at.contains(depth) {
                    return Err(QueryError::Timeout {
                        query: query.to_string(),
                        after_ms: 1,
                    });
                }
                if self.history_len.is_some_and(|len| *depth > len) {
                    return Self::rejected(query, failure);
                }
                let lines = self
                    .branches_at
                    .get(depth)
                    .map(|b| b.join("\n"))
                    .unwrap_or_default();
                Ok(CommandResult::ok(lines))
            }
            GitQuery::DiffNameOnly { .. } => match &self.diff_output {
                Some(out) => Ok(CommandResult::ok(out.clone())),
                None => Self::rejected(query, failure),
            },
            GitQuery::VerifyRef { rev } => {
                if self.existing_refs.contains(rev.as_str()) {
                    Ok(CommandResult::ok("0123456789abcdef0123456789abcdef01234567\n"))
                } else {
                    Self::rejected(query, failure)
                }
            }
        }
    }
}

#[async_trait]
impl RevisionQuery for ScriptedRepo {
    async fn run(
        &self,
        cwd: &Utf8Path,
        query: &GitQuery,
        failure: FailureMode,
    ) -> Result<CommandResult, QueryError> {
        self.log().push((cwd.to_path_buf(), query.clone()));
        self.answer(query, failure)
    }
}
