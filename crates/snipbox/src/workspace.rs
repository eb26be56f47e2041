//! Workspace lifecycle for dispatch calls
//!
//! Each dispatch call gets a fresh, exclusively-owned directory holding the
//! submitted source and, for compiled languages, the build artifact. The
//! directory never outlives the call that created it.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{BINARY_NAME, Config, Language};

/// Errors that occur during workspace setup or teardown
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to create workspace directory: {0}")]
    Create(#[source] std::io::Error),

    #[error("failed to write source file: {0}")]
    WriteSource(#[source] std::io::Error),

    #[error("failed to remove workspace directory: {0}")]
    Remove(#[source] std::io::Error),
}

/// An ephemeral per-dispatch directory with the source file materialized
///
/// # Cleanup
///
/// Call [`close()`](Self::close) on the normal path to observe removal
/// errors. Dropping the workspace also removes the directory, so early
/// error paths (`?` before the explicit close) cannot leak it.
#[derive(Debug)]
pub struct Workspace {
    /// Backing directory; removed on close or drop
    dir: TempDir,

    /// Path to the written source file (main.<extension>)
    source_path: PathBuf,

    /// Path to the expected build artifact (main)
    binary_path: PathBuf,
}

impl Workspace {
    /// Create a fresh workspace and write the source text into it
    #[instrument(skip(config, language, source), fields(language = %language.name))]
    pub async fn create(
        config: &Config,
        language: &Language,
        source: &str,
    ) -> Result<Self, WorkspaceError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("snipbox-");

        let dir = match config.workspace_root {
            Some(ref root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(WorkspaceError::Create)?;

        let source_path = dir.path().join(language.source_name());
        let binary_path = dir.path().join(BINARY_NAME);

        tokio::fs::write(&source_path, source)
            .await
            .map_err(WorkspaceError::WriteSource)?;

        debug!(
            path = %source_path.display(),
            len = source.len(),
            "workspace ready"
        );

        Ok(Self {
            dir,
            source_path,
            binary_path,
        })
    }

    /// Get the workspace directory path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Get the path to the written source file
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Get the path where the compile stage places its artifact
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Remove the workspace directory and all its contents
    #[must_use = "removal errors should be handled"]
    pub fn close(self) -> Result<(), WorkspaceError> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(WorkspaceError::Remove)?;
        debug!(path = %path.display(), "workspace removed");
        Ok(())
    }
}
