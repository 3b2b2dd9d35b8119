use camino::Utf8Path;
use lintscope_domain::{FailureMode, GitQuery, QueryError, RevisionQuery};
use lintscope_types::{ChangedFileSet, RevisionRef};

/// Files under `scope` that differ from `base` and still exist, as absolute paths.
///
/// The diff runs with `scope` as working directory so `--relative` limits it to that
/// subtree. Entries are NUL-separated and taken verbatim: no unquoting, no trimming.
/// A base git cannot resolve is an error here, unlike during resolution.
pub async fn list_changed_files(
    query: &dyn RevisionQuery,
    base: &RevisionRef,
    scope: &Utf8Path,
) -> Result<ChangedFileSet, QueryError> {
    let diff = GitQuery::DiffNameOnly { base: base.clone() };
    let scope = scope
        .canonicalize_utf8()
        .map_err(|source| QueryError::ProcessFailure {
            query: diff.to_string(),
            source,
        })?;

    let out = query.run(&scope, &diff, FailureMode::Fatal).await?;

    let mut deleted = 0usize;
    let files = ChangedFileSet::from_paths(out.nul_entries().filter_map(|rel| {
        let path = scope.join(rel);
        if path.exists() {
            Some(path)
        } else {
            deleted += 1;
            None
        }
    }));

    tracing::debug!(
        base = %base,
        scope = %scope,
        changed = files.len(),
        deleted,
        "listed changed files"
    );
    Ok(files)
}
