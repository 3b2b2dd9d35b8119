//! Error taxonomy for revision queries and base resolution.

use lintscope_types::RevisionRef;
use std::fmt;

/// Failure of a single revision-command invocation.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Git ran and rejected the query (missing ref, history too short, ...).
    #[error("`{query}` failed: {stderr}")]
    RefNotFound { query: String, stderr: String },

    #[error("`{query}` timed out after {after_ms}ms")]
    Timeout { query: String, after_ms: u64 },

    /// Git could not be started at all (binary missing, bad working directory).
    #[error("could not run `{query}`: {source}")]
    ProcessFailure {
        query: String,
        #[source]
        source: std::io::Error,
    },
}

impl QueryError {
    /// Recoverable errors mean "no candidate here"; the rest abort resolution.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, QueryError::ProcessFailure { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Automated mode without a base branch name in the environment.
    MissingExternalBase,
    /// No candidate branch within `depth` ancestors.
    WalkExhausted { depth: u32 },
    /// Operator-supplied base exists neither locally nor on the remote.
    ExplicitBaseMissing { reference: RevisionRef },
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::MissingExternalBase => {
                f.write_str("automated mode but no base branch was supplied by the environment")
            }
            UnresolvedReason::WalkExhausted { depth } => write!(
                f,
                "no other branch contains any of the last {depth} ancestors of head"
            ),
            UnresolvedReason::ExplicitBaseMissing { reference } => {
                write!(f, "base `{reference}` does not exist locally or on the remote")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("could not determine a base revision: {reason}")]
    Unresolved { reason: UnresolvedReason },

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("base resolution was cancelled")]
    Cancelled,
}

impl ResolveError {
    pub fn unresolved(reason: UnresolvedReason) -> Self {
        ResolveError::Unresolved { reason }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolveError::Unresolved { .. })
    }
}
