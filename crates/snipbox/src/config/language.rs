use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::config::ConfigError;

const INVALID_FILE_EXT_CHARS: [char; 2] = ['/', '.'];

/// Base name of the source file inside a workspace
pub const SOURCE_BASE_NAME: &str = "main";

/// Name of the build artifact inside a workspace (no extension)
pub const BINARY_NAME: &str = "main";

/// Configuration for one registered language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    /// Human-readable name for the language (e.g., "Python 3")
    pub name: String,

    /// File extension for the source file
    pub extension: FileExtension,

    /// Compile stage (None when the language has no pre-run check).
    /// For interpreted languages this is typically a syntax check that
    /// produces no artifact.
    #[serde(default)]
    pub compile: Option<CompileConfig>,

    /// Run stage
    pub run: RunConfig,
}

impl Language {
    /// Check if the language has a compile stage
    pub fn is_compiled(&self) -> bool {
        self.compile.is_some()
    }

    /// Get the source file name for this language (e.g., "main.py")
    pub fn source_name(&self) -> String {
        format!("{SOURCE_BASE_NAME}.{}", self.extension)
    }

    /// Expand placeholders in the given command
    ///
    /// Replaces `{source}` with the source file path and `{binary}` with the
    /// build artifact path in every argument.
    pub fn expand_command(command: &[String], source: &str, binary: &str) -> Vec<String> {
        command
            .iter()
            .map(|arg| arg.replace("{source}", source).replace("{binary}", binary))
            .collect()
    }
}

/// File extension without dot (e.g., "py")
#[derive(Debug, Clone, Serialize)]
pub struct FileExtension(String);

impl FileExtension {
    pub fn new(extension: &str) -> Result<Self, ConfigError> {
        let contains_invalid = extension
            .chars()
            .any(|c| INVALID_FILE_EXT_CHARS.contains(&c));
        if contains_invalid {
            return Err(ConfigError::InvalidFileExtChars);
        }
        Ok(Self(extension.to_owned()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for FileExtension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FileExtension::new(&s).map_err(|_| {
            de::Error::invalid_value(
                de::Unexpected::Str(&s),
                &"a file extension without '/' or '.' characters",
            )
        })
    }
}

impl std::fmt::Display for FileExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for the compile stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Command and arguments with placeholders
    /// Placeholders: {source}, {binary}
    pub command: Vec<String>,

    /// Environment variables to set during compilation
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// Configuration for the run stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Command and arguments with placeholders
    /// Placeholders: {source}, {binary}
    pub command: Vec<String>,

    /// Environment variables to set
    #[serde(default)]
    pub env: HashMap<String, String>,
}
