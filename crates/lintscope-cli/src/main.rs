//! CLI entry point for lintscope.
//!
//! This module is intentionally thin: it handles argument parsing, environment capture, I/O,
//! and exit codes. All resolution and planning lives in `lintscope-app`.

#![forbid(unsafe_code)]

mod telemetry;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use lintscope_app::{
    EXIT_ERROR, EXIT_OK, OutputFormat, ScopeInput, ScopeOutput, UNRESOLVED_HINT, error_exit_code,
    is_unresolved, parse_output_format, plan_targets, read_config_text, render_base, render_plan,
    run_base, run_scope, write_report,
};
use lintscope_settings::{Environment, Overrides};
use std::io::Write;
use std::process::{ExitCode, Stdio};
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(
    name = "lintscope",
    version,
    about = "Resolve the base revision of a git working copy and scope linting to what changed"
)]
struct Cli {
    /// Repository root; git queries run here.
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to lintscope config TOML, relative to the repository root.
    #[arg(long, default_value = "lintscope.toml")]
    config: Utf8PathBuf,

    /// Override profile (local|cli|ci).
    #[arg(long)]
    profile: Option<String>,

    /// Override selection strategy (named-priority|last-sorted).
    #[arg(long)]
    strategy: Option<String>,

    /// Override what happens when the ancestor walk finds nothing (unresolved|upstream).
    #[arg(long)]
    on_exhaustion: Option<String>,

    /// Override how many ancestors the walk inspects (clamped to 1..=99).
    #[arg(long)]
    max_depth: Option<u32>,

    /// Force the invocation mode (auto|automated|interactive).
    #[arg(long)]
    mode: Option<String>,

    /// Revision whose base is resolved.
    #[arg(long)]
    head: Option<String>,

    /// Per git invocation timeout in milliseconds (0 disables).
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Git binary to run.
    #[arg(long)]
    git: Option<Utf8PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved base revision.
    Base {
        /// Use this base instead of resolving one (also LINTSCOPE_BASE).
        #[arg(long)]
        base: Option<String>,

        /// Output format (text|nul|json).
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the files to lint: changed files, or the scope root when a sentinel changed.
    Files {
        /// Use this base instead of resolving one (also LINTSCOPE_BASE).
        #[arg(long)]
        base: Option<String>,

        /// Directory to list, relative to the repository root.
        #[arg(long)]
        scope: Option<Utf8PathBuf>,

        /// Output format (text|nul|json).
        #[arg(long, default_value = "text")]
        format: String,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },

    /// Run a checker on the files to lint and pass its exit code through.
    Run {
        /// Use this base instead of resolving one (also LINTSCOPE_BASE).
        #[arg(long)]
        base: Option<String>,

        /// Directory to list, relative to the repository root.
        #[arg(long)]
        scope: Option<Utf8PathBuf>,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Checker command; the targets are appended as arguments.
        #[arg(last = true, required = true, num_args = 1..)]
        command: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = telemetry::init_tracing(cli.log_json, &cli.log_level) {
        eprintln!("lintscope error: {err:#}");
        return exit_code(EXIT_ERROR);
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let env = Environment::from_env();
    match dispatch(&cli, &env, cancel).await {
        Ok(code) => exit_code(code),
        Err(err) => {
            eprintln!("lintscope error: {err:#}");
            if is_unresolved(&err) {
                eprintln!("hint: {UNRESOLVED_HINT}");
            }
            exit_code(error_exit_code(&err))
        }
    }
}

async fn dispatch(
    cli: &Cli,
    env: &Environment,
    cancel: CancellationToken,
) -> anyhow::Result<i32> {
    let repo_root = cli
        .repo_root
        .canonicalize_utf8()
        .with_context(|| format!("repo root does not exist: {}", cli.repo_root))?;
    let config_text = read_config_text(&repo_root.join(&cli.config))?;

    match &cli.cmd {
        Commands::Base { base, format } => {
            let format = parse_output_format(format)?;
            let input = scope_input(cli, env, &repo_root, &config_text, base.clone(), None, cancel);
            cmd_base(&input, format).await
        }
        Commands::Files {
            base,
            scope,
            format,
            report_out,
        } => {
            let format = parse_output_format(format)?;
            let input = scope_input(
                cli,
                env,
                &repo_root,
                &config_text,
                base.clone(),
                scope.as_deref(),
                cancel,
            );
            cmd_files(&input, format, report_out.as_deref()).await
        }
        Commands::Run {
            base,
            scope,
            report_out,
            command,
        } => {
            let input = scope_input(
                cli,
                env,
                &repo_root,
                &config_text,
                base.clone(),
                scope.as_deref(),
                cancel,
            );
            cmd_run(&input, report_out.as_deref(), command).await
        }
    }
}

fn scope_input<'a>(
    cli: &Cli,
    env: &'a Environment,
    repo_root: &'a Utf8Path,
    config_text: &'a str,
    base: Option<String>,
    scope: Option<&'a Utf8Path>,
    cancel: CancellationToken,
) -> ScopeInput<'a> {
    ScopeInput {
        repo_root,
        scope,
        config_text,
        overrides: Overrides {
            profile: cli.profile.clone(),
            strategy: cli.strategy.clone(),
            on_exhaustion: cli.on_exhaustion.clone(),
            max_depth: cli.max_depth,
            timeout_ms: cli.timeout_ms,
            mode: cli.mode.clone(),
            head: cli.head.clone(),
        },
        env,
        explicit_base: base,
        git_program: cli.git.clone(),
        cancel,
    }
}

async fn cmd_base(input: &ScopeInput<'_>, format: OutputFormat) -> anyhow::Result<i32> {
    let out = run_base(input).await?;
    print_stdout(&render_base(&out.base, format)?)?;
    Ok(EXIT_OK)
}

async fn cmd_files(
    input: &ScopeInput<'_>,
    format: OutputFormat,
    report_out: Option<&Utf8Path>,
) -> anyhow::Result<i32> {
    let out = scope_and_report(input, report_out).await?;
    print_stdout(&render_plan(&out.plan, &out.scope_root, &out.report, format)?)?;
    Ok(EXIT_OK)
}

async fn cmd_run(
    input: &ScopeInput<'_>,
    report_out: Option<&Utf8Path>,
    command: &[String],
) -> anyhow::Result<i32> {
    let out = scope_and_report(input, report_out).await?;
    let targets = plan_targets(&out.plan, &out.scope_root);
    if targets.is_empty() {
        tracing::info!("no files to lint; checker not started");
        return Ok(EXIT_OK);
    }

    let Some((program, args)) = command.split_first() else {
        anyhow::bail!("missing checker command");
    };
    tracing::info!(program = %program, targets = targets.len(), "starting checker");

    let status = tokio::process::Command::new(program)
        .args(args)
        .args(&targets)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("start checker: {program}"))?;

    // Killed by a signal: no code to pass through.
    Ok(status.code().unwrap_or(EXIT_ERROR))
}

async fn scope_and_report(
    input: &ScopeInput<'_>,
    report_out: Option<&Utf8Path>,
) -> anyhow::Result<ScopeOutput> {
    let out = run_scope(input).await?;
    if let Some(path) = report_out {
        write_report(path, &out.report).context("write report json")?;
    }
    Ok(out)
}

fn print_stdout(text: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("write stdout")?;
    stdout.flush().context("flush stdout")
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
