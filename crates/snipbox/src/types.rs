use serde::{Deserialize, Serialize};

/// Outcome of one dispatch call.
///
/// Exactly one field is ever populated: `output` carries the captured stdout
/// of a successful run, `error` carries either the fixed
/// `Unsupported language: <id>` message or the stderr of whichever stage
/// failed. The untagged representation keeps the wire shape as
/// `{"output": ...}` / `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DispatchOutcome {
    /// The run stage exited successfully
    Output {
        /// Captured standard output of the run process
        output: String,
    },

    /// Some stage failed, or the language is not registered
    Error {
        /// Human-readable failure text
        error: String,
    },
}

impl DispatchOutcome {
    /// Build a success outcome from captured stdout
    pub fn output(stdout: impl Into<String>) -> Self {
        Self::Output {
            output: stdout.into(),
        }
    }

    /// Build a failure outcome from an error message
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Check if this outcome is a success
    #[must_use]
    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output { .. })
    }
}

/// The two stages of a dispatch call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Compile,
    Run,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Compile => write!(f, "compile"),
            Stage::Run => write!(f, "run"),
        }
    }
}

/// Captured result of one stage subprocess
#[derive(Debug, Clone)]
pub struct StageOutput {
    /// Exit code if the process exited normally (None if killed by a signal)
    pub exit_code: Option<i32>,

    /// Captured standard output, lossily decoded as UTF-8
    pub stdout: String,

    /// Captured standard error, lossily decoded as UTF-8
    pub stderr: String,
}

impl StageOutput {
    /// Check if the stage exited with code 0
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_output_constructor() {
        let outcome = DispatchOutcome::output("hello\n");
        assert!(outcome.is_output());
        assert_eq!(
            outcome,
            DispatchOutcome::Output {
                output: "hello\n".to_owned()
            }
        );
    }

    #[test]
    fn outcome_error_constructor() {
        let outcome = DispatchOutcome::error("boom");
        assert!(!outcome.is_output());
        assert_eq!(
            outcome,
            DispatchOutcome::Error {
                error: "boom".to_owned()
            }
        );
    }

    #[test]
    fn outcome_serializes_output_field_only() {
        let outcome = DispatchOutcome::output("Hello, Python!\n");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({"output": "Hello, Python!\n"}));
    }

    #[test]
    fn outcome_serializes_error_field_only() {
        let outcome = DispatchOutcome::error("Unsupported language: rust");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Unsupported language: rust"}));
    }

    #[test]
    fn outcome_deserializes_both_shapes() {
        let output: DispatchOutcome = serde_json::from_str(r#"{"output":"x\n"}"#).unwrap();
        assert_eq!(output, DispatchOutcome::output("x\n"));

        let error: DispatchOutcome = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert_eq!(error, DispatchOutcome::error("nope"));
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Compile.to_string(), "compile");
        assert_eq!(Stage::Run.to_string(), "run");
    }

    #[test]
    fn stage_output_success() {
        let output = StageOutput {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(output.success());
    }

    #[test]
    fn stage_output_failure_non_zero() {
        let output = StageOutput {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "SyntaxError".to_owned(),
        };
        assert!(!output.success());
    }

    #[test]
    fn stage_output_failure_signaled() {
        let output = StageOutput {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(!output.success());
    }
}
