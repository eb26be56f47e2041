//! Integration tests for snipbox
//!
//! These tests dispatch real snippets and therefore require the reference
//! toolchains (python3, ruby, go) on the host.
//! Run with: cargo test -p snipbox --features toolchain-tests

#![cfg(feature = "toolchain-tests")]

use snipbox::{Config, Runner};

mod dispatch;
mod selfcheck;

/// Runner over the embedded reference registry
pub(crate) fn test_runner() -> Runner {
    Runner::new(Config::default())
}

/// Runner whose workspaces land under `root`, so leaks are observable
pub(crate) fn rooted_runner(root: &std::path::Path) -> Runner {
    let config = Config {
        workspace_root: Some(root.to_path_buf()),
        ..Config::default()
    };
    Runner::new(config)
}
