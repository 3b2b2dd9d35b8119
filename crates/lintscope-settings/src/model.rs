use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stable schema identifier for `lintscope.toml`.
pub const SCHEMA_CONFIG_V1: &str = "lintscope.config.v1";

/// `lintscope.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional so a missing or partial
/// file simply falls back to the selected profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LintscopeConfigV1 {
    /// Optional schema string for tooling (`lintscope.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `local` (default), `cli` or `ci`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// `named-priority` or `last-sorted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// `unresolved` or `upstream`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_exhaustion: Option<String>,

    /// Deepest ancestor inspected by the walk; clamped to 1..=99.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,

    /// Per git invocation, in milliseconds. `0` disables the timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Remote whose tracking branches stand in for CI base branches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    /// Revision whose base is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,

    /// `automated`, `interactive` or `auto` (decided by the environment).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Check that an explicit base exists before using it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_explicit: Option<bool>,

    /// File extensions handed to the checker (`"js"` or `".js"`). Empty keeps every file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Globs anchored at the scope root (`**/` for any depth); a changed match lints the
    /// whole tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentinels: Option<Vec<String>>,
}
