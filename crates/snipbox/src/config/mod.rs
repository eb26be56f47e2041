use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub use crate::config::language::{
    BINARY_NAME, CompileConfig, FileExtension, Language, RunConfig, SOURCE_BASE_NAME,
};

pub mod language;
mod loader;

/// Example configuration embedded at compile time.
///
/// Library users can access this to generate a starter config file.
pub const EXAMPLE_CONFIG: &str = include_str!("../../snipbox.example.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid characters in file extension")]
    InvalidFileExtChars,

    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("language '{0}' not found in configuration")]
    LanguageNotFound(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Per-stage subprocess timeouts in seconds.
///
/// A stage that runs past its timeout is killed and the dispatch call
/// resolves to an error naming the stage.
#[derive(Debug, Clone, Deserialize)]
pub struct StageTimeouts {
    /// Timeout for the compile stage
    #[serde(default = "default_compile_timeout")]
    pub compile: u64,

    /// Timeout for the run stage
    #[serde(default = "default_run_timeout")]
    pub run: u64,
}

impl StageTimeouts {
    /// Compile stage timeout as a [`Duration`]
    pub fn compile_duration(&self) -> Duration {
        Duration::from_secs(self.compile)
    }

    /// Run stage timeout as a [`Duration`]
    pub fn run_duration(&self) -> Duration {
        Duration::from_secs(self.run)
    }
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self {
            compile: default_compile_timeout(),
            run: default_run_timeout(),
        }
    }
}

fn default_compile_timeout() -> u64 {
    60
}

fn default_run_timeout() -> u64 {
    10
}

/// Config for snipbox
///
/// Built once at process start and shared read-only across dispatch calls;
/// nothing mutates it after load.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory under which per-dispatch workspaces are created.
    /// Uses the system temporary directory if not specified.
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,

    /// Per-stage subprocess timeouts
    #[serde(default)]
    pub timeouts: StageTimeouts,

    /// Language configurations keyed by language ID
    #[serde(default)]
    pub languages: HashMap<String, Language>,
}

impl Config {
    /// Create a new config with the embedded default languages
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty config with no languages
    pub fn empty() -> Self {
        Self {
            workspace_root: None,
            timeouts: StageTimeouts::default(),
            languages: HashMap::new(),
        }
    }

    /// Get a language by ID
    pub fn get_language(&self, id: &str) -> Result<&Language, ConfigError> {
        self.languages
            .get(id)
            .ok_or_else(|| ConfigError::LanguageNotFound(id.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_toml(EXAMPLE_CONFIG).expect("embedded default config should be valid")
    }
}
