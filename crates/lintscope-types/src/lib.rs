//! Stable DTOs and IDs used across the lintscope workspace.
//!
//! This crate is intentionally boring:
//! - revision references and the invocation mode
//! - the changed-file set handed to downstream checkers
//! - the lint plan and the resolved-base record
//! - data types for the emitted report

#![forbid(unsafe_code)]

pub mod files;
pub mod ids;
pub mod plan;
pub mod receipt;
pub mod revision;

pub use files::ChangedFileSet;
pub use plan::LintPlan;
pub use receipt::{
    BaseRecord, PlanKind, PlanRecord, RunCi, RunMeta, SCHEMA_REPORT_V1, ScopeReportV1, ToolMeta,
};
pub use revision::{BaseSource, CommandResult, InvocationMode, ResolvedBase, RevisionRef};
