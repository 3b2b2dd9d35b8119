//! Building, serializing and writing the `lintscope.report.v1` receipt.

use anyhow::Context;
use camino::Utf8Path;
use lintscope_settings::Environment;
use lintscope_types::{
    BaseRecord, InvocationMode, LintPlan, PlanKind, PlanRecord, ResolvedBase, RevisionRef, RunCi,
    RunMeta, SCHEMA_REPORT_V1, ScopeReportV1, ToolMeta,
};
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub struct ReportInput<'a> {
    pub started_at: OffsetDateTime,
    pub ended_at: OffsetDateTime,
    pub mode: InvocationMode,
    pub scope_root: &'a Utf8Path,
    pub head: &'a RevisionRef,
    pub base: &'a ResolvedBase,
    pub plan: &'a LintPlan,
    pub changed_total: usize,
    pub env: &'a Environment,
}

pub fn build_report(input: ReportInput<'_>) -> ScopeReportV1 {
    let duration_ms = (input.ended_at - input.started_at)
        .whole_milliseconds()
        .max(0) as u64;

    let ci = input.env.ci.then(|| RunCi {
        provider: input.env.ci_provider.clone(),
        base_branch: input.env.base_branch.clone(),
    });

    let plan = match input.plan {
        LintPlan::Files(files) => PlanRecord {
            kind: PlanKind::Files,
            files: files.iter().map(|p| p.to_string()).collect(),
            sentinel: None,
            changed_total: input.changed_total as u32,
        },
        LintPlan::WholeTree { sentinel } => PlanRecord {
            kind: PlanKind::WholeTree,
            files: Vec::new(),
            sentinel: Some(sentinel.to_string()),
            changed_total: input.changed_total as u32,
        },
        LintPlan::Nothing => PlanRecord {
            kind: PlanKind::Nothing,
            files: Vec::new(),
            sentinel: None,
            changed_total: input.changed_total as u32,
        },
    };

    ScopeReportV1 {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "lintscope".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at: input.started_at,
            ended_at: input.ended_at,
            duration_ms,
            ci,
        },
        mode: input.mode,
        scope_root: input.scope_root.to_string(),
        base: BaseRecord {
            reference: input.base.reference.clone(),
            source: input.base.source,
            head: input.head.clone(),
        },
        plan,
    }
}

pub fn serialize_report(report: &ScopeReportV1) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn write_report(path: &Utf8Path, report: &ScopeReportV1) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    write_bytes(path, &data).with_context(|| format!("write report: {path}"))
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes()).with_context(|| format!("write text: {path}"))
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
