//! A library for compiling and running code snippets.
//!
//! Snipbox is the core of a minimal "run arbitrary snippet" backend: it maps
//! a language identifier to a pair of command templates (compile, run),
//! materializes the submitted source into a fresh per-call workspace, runs
//! the two stages as timed subprocesses, and resolves every call to a single
//! structured outcome.
//!
//! # Features
//!
//! - **Two-stage pipeline** — An optional compile stage and a mandatory run
//!   stage unify compiled and interpreted languages behind one code path.
//! - **TOML configuration** — Per-language argument-vector command templates;
//!   adding a language is a registry entry, not a code change.
//! - **Scoped workspaces** — One ephemeral directory per dispatch call,
//!   removed on every exit path.
//! - **Stage timeouts** — Each subprocess runs under an explicit, configurable
//!   deadline and is killed on expiry.
//! - **No shell** — Commands are spawned directly from argument vectors;
//!   submitted code never reaches a shell parser.

pub use config::{Config, ConfigError, EXAMPLE_CONFIG, Language};
pub use exec::ExecError;
pub use runner::{DispatchError, Runner};
pub use selfcheck::{SELF_CHECK_CASES, SelfCheckCase, SelfCheckError};
pub use types::{DispatchOutcome, Stage, StageOutput};
pub use workspace::{Workspace, WorkspaceError};

pub mod config;
pub mod exec;
pub mod runner;
pub mod selfcheck;
pub mod types;
pub mod workspace;
