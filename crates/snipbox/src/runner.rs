//! Compile-and-run dispatch pipeline
//!
//! One dispatch call looks up the language, opens a scoped workspace, runs
//! the compile stage (when configured) and then the run stage, and resolves
//! to a single structured outcome. Every failure is terminal for that call
//! and reported synchronously as a value; nothing is retried or escalated.

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::{Config, Language};
use crate::exec::{self, ExecError};
use crate::types::{DispatchOutcome, Stage};
use crate::workspace::{Workspace, WorkspaceError};

/// Errors that occur during a dispatch call
///
/// The `Display` text of each variant is exactly what the API layer reports:
/// compile and run failures carry the stage's stderr verbatim.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("{stderr}")]
    CompileFailed { stderr: String },

    #[error("{stderr}")]
    RunFailed { stderr: String },

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// High-level dispatcher for code execution
///
/// Holds the read-only language registry; safe to share across concurrent
/// dispatch calls, each of which owns its workspace exclusively.
#[derive(Debug, Clone)]
pub struct Runner {
    config: Config,
}

impl Runner {
    /// Create a new runner with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a new runner with default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dispatch one `(code, language)` pair and resolve it to an outcome
    ///
    /// Never fails outright: every error is converted into
    /// [`DispatchOutcome::Error`] so callers always receive a well-formed
    /// result.
    #[instrument(skip(self, code))]
    pub async fn dispatch(&self, code: &str, language_id: &str) -> DispatchOutcome {
        match self.try_dispatch(code, language_id).await {
            Ok(stdout) => DispatchOutcome::output(stdout),
            Err(err) => {
                debug!(%err, "dispatch failed");
                DispatchOutcome::error(err.to_string())
            }
        }
    }

    /// Typed variant of [`dispatch`](Self::dispatch)
    ///
    /// Returns the captured stdout of a successful run, or the first error
    /// encountered.
    pub async fn try_dispatch(
        &self,
        code: &str,
        language_id: &str,
    ) -> Result<String, DispatchError> {
        // Unknown language short-circuits before any workspace exists
        let language = self
            .config
            .get_language(language_id)
            .map_err(|_| DispatchError::UnsupportedLanguage(language_id.to_owned()))?;

        let workspace = Workspace::create(&self.config, language, code).await?;
        let result = self.run_stages(language, &workspace).await;

        // Destroyed exactly once, whichever branch resolved above
        if let Err(err) = workspace.close() {
            warn!(%err, "workspace cleanup failed");
        }

        result
    }

    /// Run the compile stage (if present) and then the run stage
    async fn run_stages(
        &self,
        language: &Language,
        workspace: &Workspace,
    ) -> Result<String, DispatchError> {
        let source = workspace.source_path().to_string_lossy().into_owned();
        let binary = workspace.binary_path().to_string_lossy().into_owned();

        if let Some(ref compile) = language.compile {
            let argv = Language::expand_command(&compile.command, &source, &binary);
            let output = exec::run_stage(
                Stage::Compile,
                &argv,
                &compile.env,
                workspace.path(),
                self.config.timeouts.compile_duration(),
            )
            .await?;

            if !output.success() {
                return Err(DispatchError::CompileFailed {
                    stderr: output.stderr,
                });
            }

            debug!(language = %language.name, "compile stage succeeded");
        }

        // The run stage never starts before the compile stage has exited
        // with success.
        let argv = Language::expand_command(&language.run.command, &source, &binary);
        let output = exec::run_stage(
            Stage::Run,
            &argv,
            &language.run.env,
            workspace.path(),
            self.config.timeouts.run_duration(),
        )
        .await?;

        if !output.success() {
            return Err(DispatchError::RunFailed {
                stderr: output.stderr,
            });
        }

        // Stderr of a successful run is discarded; only stdout is reported.
        Ok(output.stdout)
    }
}
