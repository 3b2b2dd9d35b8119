//! Use case orchestration for lintscope.
//!
//! This crate provides the application layer: use cases that coordinate settings, the
//! resolver, the git adapter and report building. The CLI crate depends on this; it only
//! handles argument parsing, process I/O and exit codes.

#![forbid(unsafe_code)]

mod exit;
mod render;
mod report;
mod scope;

pub use exit::{
    EXIT_ERROR, EXIT_OK, EXIT_UNRESOLVED, UNRESOLVED_HINT, error_exit_code, is_unresolved,
};
pub use render::{OutputFormat, parse_output_format, plan_targets, render_base, render_plan};
pub use report::{ReportInput, build_report, serialize_report, write_report, write_text};
pub use scope::{
    BaseOutput, ScopeInput, ScopeOutput, load_config, read_config_text, run_base, run_scope,
};
