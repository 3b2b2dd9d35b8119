use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque name of a commit-like point in history.
///
/// A local branch (`refs/heads/develop`), a remote-tracking name
/// (`refs/remotes/origin/develop`), a symbolic name (`HEAD`, `HEAD@{upstream}`)
/// or a raw object id. Nothing here parses the value beyond the prefix and
/// equality comparisons the resolver needs.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RevisionRef(String);

pub const LOCAL_BRANCH_PREFIX: &str = "refs/heads/";
pub const REMOTE_BRANCH_PREFIX: &str = "refs/remotes/";

impl RevisionRef {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    /// The current checkout.
    pub fn head() -> Self {
        Self::new("HEAD")
    }

    /// `refs/heads/<name>`.
    pub fn local_branch(name: &str) -> Self {
        Self(format!("{LOCAL_BRANCH_PREFIX}{name}"))
    }

    /// `refs/remotes/<remote>/<name>`.
    pub fn remote_tracking(remote: &str, name: &str) -> Self {
        Self(format!("{REMOTE_BRANCH_PREFIX}{remote}/{name}"))
    }

    /// `<self>@{upstream}`: whatever this ref is configured to track.
    pub fn upstream(&self) -> Self {
        Self(format!("{}@{{upstream}}", self.0))
    }

    /// `<self>~<depth>`: the ancestor `depth` first-parent steps back.
    pub fn ancestor(&self, depth: u32) -> Self {
        Self(format!("{}~{depth}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for RevisionRef {
    fn default() -> Self {
        Self::head()
    }
}

impl fmt::Display for RevisionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RevisionRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RevisionRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Whether we run under CI with an externally supplied base branch, or on a
/// developer machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvocationMode {
    Automated,
    Interactive,
}

impl InvocationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InvocationMode::Automated => "automated",
            InvocationMode::Interactive => "interactive",
        }
    }
}

/// Output of one revision-command invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub success: bool,
}

impl CommandResult {
    pub fn ok<S: Into<String>>(stdout: S) -> Self {
        Self {
            stdout: stdout.into(),
            success: true,
        }
    }

    pub fn failed() -> Self {
        Self {
            stdout: String::new(),
            success: false,
        }
    }

    /// Trimmed stdout.
    pub fn text(&self) -> &str {
        self.stdout.trim()
    }

    /// Non-empty, trimmed output lines in emission order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// NUL-separated entries as printed by `-z` output, untouched apart from dropping
    /// empty ones. Paths may legitimately carry leading or trailing whitespace.
    pub fn nul_entries(&self) -> impl Iterator<Item = &str> {
        self.stdout.split('\0').filter(|entry| !entry.is_empty())
    }
}

/// Which resolution rule produced a base reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BaseSource {
    /// Supplied by the operator (`--base` / `LINTSCOPE_BASE`).
    Explicit,
    /// Base branch name handed over by the CI environment.
    ExternalBase,
    /// Head tracks a local-only branch.
    LocalUpstream,
    /// Found on another branch `distance` commits back.
    AncestorWalk { distance: u32 },
    /// Walk exhausted; fell back to `<head>@{upstream}`.
    UpstreamFallback,
}

impl BaseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseSource::Explicit => "explicit",
            BaseSource::ExternalBase => "external_base",
            BaseSource::LocalUpstream => "local_upstream",
            BaseSource::AncestorWalk { .. } => "ancestor_walk",
            BaseSource::UpstreamFallback => "upstream_fallback",
        }
    }
}

/// The single reference the resolver settled on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBase {
    pub reference: RevisionRef,
    pub source: BaseSource,
}

impl ResolvedBase {
    pub fn new(reference: RevisionRef, source: BaseSource) -> Self {
        Self { reference, source }
    }
}
