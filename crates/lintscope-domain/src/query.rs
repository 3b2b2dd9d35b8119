//! The port through which the domain talks to version control.

use crate::error::QueryError;
use async_trait::async_trait;
use camino::Utf8Path;
use lintscope_types::{CommandResult, RevisionRef};
use std::fmt;

/// The query shapes lintscope ever asks git.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GitQuery {
    /// Full ref name of what `rev` tracks (`refs/heads/..` or `refs/remotes/..`).
    UpstreamOf { rev: RevisionRef },
    /// Short branch name of `rev` (`HEAD` when detached).
    AbbrevRef { rev: RevisionRef },
    /// Full names of every local branch containing `rev~depth`.
    BranchesContaining { rev: RevisionRef, depth: u32 },
    /// Paths changed between `base` and the working tree, relative to the cwd.
    /// NUL-terminated and unquoted, so any file name survives verbatim.
    DiffNameOnly { base: RevisionRef },
    /// Whether `rev` names an existing object.
    VerifyRef { rev: RevisionRef },
}

impl GitQuery {
    /// Arguments following the `git` binary.
    pub fn args(&self) -> Vec<String> {
        match self {
            GitQuery::UpstreamOf { rev } => vec![
                "rev-parse".to_string(),
                "--symbolic-full-name".to_string(),
                rev.upstream().into_string(),
            ],
            GitQuery::AbbrevRef { rev } => vec![
                "rev-parse".to_string(),
                "--abbrev-ref".to_string(),
                rev.to_string(),
            ],
            GitQuery::BranchesContaining { rev, depth } => vec![
                "branch".to_string(),
                "--contains".to_string(),
                rev.ancestor(*depth).into_string(),
                "--format=%(refname)".to_string(),
            ],
            GitQuery::DiffNameOnly { base } => vec![
                "diff".to_string(),
                "--name-only".to_string(),
                "-z".to_string(),
                base.to_string(),
                "--relative".to_string(),
            ],
            GitQuery::VerifyRef { rev } => vec![
                "rev-parse".to_string(),
                "--verify".to_string(),
                "--quiet".to_string(),
                rev.to_string(),
            ],
        }
    }
}

impl fmt::Display for GitQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args().join(" "))
    }
}

/// How the executor reports a query that git rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureMode {
    /// Non-zero exit is an ordinary result with `success == false`.
    Expected,
    /// Non-zero exit becomes [`QueryError::RefNotFound`].
    Fatal,
}

/// Runs one query in an explicit working directory.
///
/// Implementations must never consult the process's current directory.
#[async_trait]
pub trait RevisionQuery: Send + Sync {
    async fn run(
        &self,
        cwd: &Utf8Path,
        query: &GitQuery,
        failure: FailureMode,
    ) -> Result<CommandResult, QueryError>;
}

#[async_trait]
impl<T: RevisionQuery + ?Sized> RevisionQuery for &T {
    async fn run(
        &self,
        cwd: &Utf8Path,
        query: &GitQuery,
        failure: FailureMode,
    ) -> Result<CommandResult, QueryError> {
        (**self).run(cwd, query, failure).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_shapes_render_as_git_commands() {
        let head = RevisionRef::head();
        assert_eq!(
            GitQuery::UpstreamOf { rev: head.clone() }.to_string(),
            "git rev-parse --symbolic-full-name HEAD@{upstream}"
        );
        assert_eq!(
            GitQuery::BranchesContaining {
                rev: head.clone(),
                depth: 7
            }
            .to_string(),
            "git branch --contains HEAD~7 --format=%(refname)"
        );
        assert_eq!(
            GitQuery::DiffNameOnly {
                base: RevisionRef::local_branch("develop")
            }
            .to_string(),
            "git diff --name-only -z refs/heads/develop --relative"
        );
    }
}
