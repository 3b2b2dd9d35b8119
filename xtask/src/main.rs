//! Developer tasks (schema generation and report checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use lintscope_settings::{LintscopeConfigV1, SCHEMA_CONFIG_V1};
use lintscope_types::{SCHEMA_REPORT_V1, ScopeReportV1};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Project root: the parent of the xtask directory.
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        return manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask directory has no parent");
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its id.
struct SchemaEntry {
    id: &'static str,
    generate: fn() -> schemars::Schema,
}

impl SchemaEntry {
    fn filename(&self) -> String {
        format!("{}.json", self.id)
    }
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(ScopeReportV1)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(LintscopeConfigV1)
}

fn schema_entries() -> Vec<SchemaEntry> {
    vec![
        SchemaEntry {
            id: SCHEMA_REPORT_V1,
            generate: generate_report_schema,
        },
        SchemaEntry {
            id: SCHEMA_CONFIG_V1,
            generate: generate_config_schema,
        },
    ]
}

/// Pretty-printed JSON with a trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    for entry in schema_entries() {
        let json = serialize_schema(&(entry.generate)())?;
        let path = dir.join(entry.filename());
        fs::write(&path, &json).with_context(|| format!("write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Fails when a checked-in schema is missing or differs from the generated one.
fn validate_schemas(dir: &Path) -> anyhow::Result<()> {
    let mut stale = Vec::new();

    for entry in schema_entries() {
        let path = dir.join(entry.filename());
        let expected = serialize_schema(&(entry.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", entry.filename())),
            Err(_) => stale.push(format!("{} (missing)", entry.filename())),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &stale {
        eprintln!("  - {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

/// Checks that a report written by `--report-out` parses as the current report schema.
fn check_report(path: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let report: ScopeReportV1 =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;

    if report.schema != SCHEMA_REPORT_V1 {
        bail!(
            "unexpected schema id {:?} (expected {SCHEMA_REPORT_V1})",
            report.schema
        );
    }
    if report.run.ended_at < report.run.started_at {
        bail!("run.ended_at precedes run.started_at");
    }
    println!("{} is a valid {SCHEMA_REPORT_V1}", path.display());
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                 Show this message");
    eprintln!("  emit-schemas         Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas     Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids     Print known schema IDs");
    eprintln!("  check-report <path>  Check a report JSON against the current report type");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(String::as_str).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(&schemas_dir()?),
        "validate-schemas" => validate_schemas(&schemas_dir()?),
        "check-report" => match args.get(2) {
            Some(path) => check_report(Path::new(path)),
            None => bail!("check-report needs a path"),
        },
        "print-schema-ids" => {
            for entry in schema_entries() {
                println!("{}", entry.id);
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
