use crate::ChangedFileSet;
use camino::Utf8PathBuf;

/// What the downstream checker should be pointed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LintPlan {
    /// Lint exactly these files.
    Files(ChangedFileSet),
    /// A sentinel file changed; lint everything under the scope root.
    WholeTree { sentinel: Utf8PathBuf },
    /// Nothing left after filtering. Not an error.
    Nothing,
}

impl LintPlan {
    pub fn is_nothing(&self) -> bool {
        matches!(self, LintPlan::Nothing)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LintPlan::Files(_) => crate::ids::PLAN_FILES,
            LintPlan::WholeTree { .. } => crate::ids::PLAN_WHOLE_TREE,
            LintPlan::Nothing => crate::ids::PLAN_NOTHING,
        }
    }
}
