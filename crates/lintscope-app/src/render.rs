//! Stdout renderings for the `base` and `files` commands, and the checker's argument list.

use anyhow::Context;
use camino::Utf8Path;
use lintscope_types::{LintPlan, ResolvedBase, ScopeReportV1};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One entry per line.
    Text,
    /// NUL-terminated entries, for `xargs -0`.
    Nul,
    /// Pretty JSON.
    Json,
}

pub fn parse_output_format(v: &str) -> anyhow::Result<OutputFormat> {
    match v {
        "text" => Ok(OutputFormat::Text),
        "nul" | "null" => Ok(OutputFormat::Nul),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("unknown format: {other} (expected text|nul|json)"),
    }
}

/// What the checker should be pointed at: the files, the scope root, or nothing.
pub fn plan_targets(plan: &LintPlan, scope_root: &Utf8Path) -> Vec<String> {
    match plan {
        LintPlan::Files(files) => files.iter().map(|p| p.to_string()).collect(),
        LintPlan::WholeTree { .. } => vec![scope_root.to_string()],
        LintPlan::Nothing => Vec::new(),
    }
}

pub fn render_plan(
    plan: &LintPlan,
    scope_root: &Utf8Path,
    report: &ScopeReportV1,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => json_line(report),
        OutputFormat::Text => Ok(terminated(&plan_targets(plan, scope_root), '\n')),
        OutputFormat::Nul => Ok(terminated(&plan_targets(plan, scope_root), '\0')),
    }
}

pub fn render_base(base: &ResolvedBase, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => json_line(base),
        OutputFormat::Text => Ok(terminated(&[base.reference.to_string()], '\n')),
        OutputFormat::Nul => Ok(terminated(&[base.reference.to_string()], '\0')),
    }
}

fn terminated(entries: &[String], terminator: char) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry);
        out.push(terminator);
    }
    out
}

fn json_line<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    let mut text = serde_json::to_string_pretty(value).context("serialize json")?;
    text.push('\n');
    Ok(text)
}
