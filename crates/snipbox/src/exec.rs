//! Stage subprocess execution
//!
//! Spawns compile and run stage processes directly from argument vectors and
//! captures their output. No shell is ever involved, so submitted code and
//! workspace paths never reach a shell parser.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::time;
use tracing::{debug, instrument};

use crate::types::{Stage, StageOutput};

/// Errors that occur while running a stage subprocess
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("empty command for {0} stage")]
    EmptyCommand(Stage),

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} stage timed out after {seconds}s")]
    Timeout { stage: Stage, seconds: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run one stage to completion with output capture
///
/// Blocks the calling task until the child exits or the timeout elapses.
/// On timeout the child is killed and [`ExecError::Timeout`] is returned.
#[instrument(skip(argv, env, workdir))]
pub async fn run_stage(
    stage: Stage,
    argv: &[String],
    env: &HashMap<String, String>,
    workdir: &Path,
    timeout: Duration,
) -> Result<StageOutput, ExecError> {
    let (program, args) = argv.split_first().ok_or(ExecError::EmptyCommand(stage))?;

    let mut command = Command::new(program);
    command
        .args(args)
        .envs(env)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(?argv, "spawning stage process");

    let child = command.spawn().map_err(|source| ExecError::Spawn {
        program: program.clone(),
        source,
    })?;

    // kill_on_drop reaps the child when the timeout drops the wait future
    let output = time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| ExecError::Timeout {
            stage,
            seconds: timeout.as_secs(),
        })??;

    let result = StageOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!(exit_code = ?result.exit_code, "stage complete");

    Ok(result)
}
