use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use lintscope_domain::{FailureMode, GitQuery, QueryError, RevisionQuery};
use lintscope_types::{CommandResult, ids};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Runs [`GitQuery`]s by spawning the git binary.
#[derive(Clone, Debug)]
pub struct GitExecutor {
    program: Utf8PathBuf,
    timeout: Option<Duration>,
}

impl GitExecutor {
    pub fn new() -> Self {
        Self {
            program: Utf8PathBuf::from("git"),
            timeout: Some(Duration::from_millis(ids::DEFAULT_TIMEOUT_MS)),
        }
    }

    /// Binary to spawn instead of `git` from `PATH`.
    pub fn with_program(mut self, program: impl Into<Utf8PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Per-invocation limit; `0` waits forever.
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = (ms > 0).then(|| Duration::from_millis(ms));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevisionQuery for GitExecutor {
    async fn run(
        &self,
        cwd: &Utf8Path,
        query: &GitQuery,
        failure: FailureMode,
    ) -> Result<CommandResult, QueryError> {
        let start = Instant::now();
        tracing::debug!(cwd = %cwd, command = %query, "running git");

        let child = Command::new(self.program.as_std_path())
            .args(query.args())
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| QueryError::ProcessFailure {
                query: query.to_string(),
                source,
            })?;

        // Dropping the pending future on expiry kills the child.
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| QueryError::Timeout {
                    query: query.to_string(),
                    after_ms: limit.as_millis() as u64,
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|source| QueryError::ProcessFailure {
            query: query.to_string(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let success = output.status.success();
        tracing::trace!(
            command = %query,
            success,
            exit_code = output.status.code(),
            duration_ms = start.elapsed().as_millis() as u64,
            stdout = %stdout.trim(),
            "git finished"
        );

        if !success && failure == FailureMode::Fatal {
            return Err(QueryError::RefNotFound {
                query: query.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(CommandResult { stdout, success })
    }
}
