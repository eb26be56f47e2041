//! Self-check harness
//!
//! Exercises the dispatch pipeline against one known-good snippet per
//! reference language and demands byte-exact output, trailing newline
//! included. Intended to catch registry misconfiguration or toolchain drift;
//! invoked from the CLI (`snipbox selfcheck`), never on the request path.

use thiserror::Error;
use tracing::{info, instrument};

use crate::runner::Runner;
use crate::types::DispatchOutcome;

/// One self-check triple
#[derive(Debug, Clone, Copy)]
pub struct SelfCheckCase {
    pub language: &'static str,
    pub code: &'static str,
    pub expected_output: &'static str,
}

/// Known-good snippets for the reference registry
pub const SELF_CHECK_CASES: &[SelfCheckCase] = &[
    SelfCheckCase {
        language: "python",
        code: r#"print("Hello, Python!")"#,
        expected_output: "Hello, Python!\n",
    },
    SelfCheckCase {
        language: "ruby",
        code: r#"puts "Hello, Ruby!""#,
        expected_output: "Hello, Ruby!\n",
    },
    SelfCheckCase {
        language: "go",
        code: "package main\nimport \"fmt\"\nfunc main() { fmt.Println(\"Hello, Go!\") }",
        expected_output: "Hello, Go!\n",
    },
];

/// Errors raised by a failed self-check run
#[derive(Debug, Error)]
pub enum SelfCheckError {
    #[error("self-check for '{language}' failed: {error}")]
    Failed { language: String, error: String },

    #[error("self-check for '{language}' produced {actual:?}, expected {expected:?}")]
    Mismatch {
        language: String,
        expected: String,
        actual: String,
    },
}

/// Run every self-check case, stopping at the first failure
#[instrument(skip(runner))]
pub async fn run(runner: &Runner) -> Result<(), SelfCheckError> {
    for case in SELF_CHECK_CASES {
        match runner.dispatch(case.code, case.language).await {
            DispatchOutcome::Output { output } if output == case.expected_output => {
                info!(language = case.language, "self-check passed");
            }
            DispatchOutcome::Output { output } => {
                return Err(SelfCheckError::Mismatch {
                    language: case.language.to_owned(),
                    expected: case.expected_output.to_owned(),
                    actual: output,
                });
            }
            DispatchOutcome::Error { error } => {
                return Err(SelfCheckError::Failed {
                    language: case.language.to_owned(),
                    error,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn cases_cover_every_default_language() {
        let config = Config::default();
        let mut covered: Vec<&str> = SELF_CHECK_CASES.iter().map(|c| c.language).collect();
        covered.sort_unstable();

        let mut registered: Vec<&str> = config.languages.keys().map(String::as_str).collect();
        registered.sort_unstable();

        assert_eq!(covered, registered);
    }

    #[test]
    fn expected_outputs_end_with_newline() {
        for case in SELF_CHECK_CASES {
            assert!(
                case.expected_output.ends_with('\n'),
                "case '{}' expects output without trailing newline",
                case.language
            );
        }
    }

    #[tokio::test]
    async fn empty_registry_fails_the_first_case() {
        let runner = Runner::new(Config::empty());
        let result = run(&runner).await;

        match result {
            Err(SelfCheckError::Failed { language, error }) => {
                assert_eq!(language, "python");
                assert_eq!(error, "Unsupported language: python");
            }
            other => panic!("expected Failed error, got {other:?}"),
        }
    }
}
