//! Process exit codes and the operator-facing hint for unresolved bases.

use lintscope_domain::ResolveError;

pub const EXIT_OK: i32 = 0;
/// Runtime failure: git could not run, bad config, unreadable paths.
pub const EXIT_ERROR: i32 = 1;
/// No base revision could be determined.
pub const EXIT_UNRESOLVED: i32 = 2;

pub const UNRESOLVED_HINT: &str =
    "pass --base <ref> or set LINTSCOPE_BASE to choose the base revision explicitly";

/// Whether `err` (or anything it wraps) is an unresolved base.
pub fn is_unresolved(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ResolveError>()
            .is_some_and(ResolveError::is_unresolved)
    })
}

pub fn error_exit_code(err: &anyhow::Error) -> i32 {
    if is_unresolved(err) {
        EXIT_UNRESOLVED
    } else {
        EXIT_ERROR
    }
}
