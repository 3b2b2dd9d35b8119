use crate::{BaseSource, InvocationMode, RevisionRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for lintscope reports.
pub const SCHEMA_REPORT_V1: &str = "lintscope.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunCi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Base branch name as handed over by the CI environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub ended_at: OffsetDateTime,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<RunCi>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BaseRecord {
    pub reference: RevisionRef,
    pub source: BaseSource,
    pub head: RevisionRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Files,
    WholeTree,
    Nothing,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanRecord {
    pub kind: PlanKind,
    /// Absolute paths, in diff order. Empty unless `kind == files`.
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentinel: Option<String>,
    /// Changed files before extension filtering.
    pub changed_total: u32,
}

/// `lintscope.report.v1` envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScopeReportV1 {
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub mode: InvocationMode,
    pub scope_root: String,
    pub base: BaseRecord,
    pub plan: PlanRecord,
}
