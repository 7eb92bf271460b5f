//! Command implementations for the CLI.

mod execution;
mod info;
mod setup;

use std::path::Path;

use anyhow::{Context, Result};
use essex_core::EssexConfig;

pub use execution::{
    cmd_commit_msg, cmd_docs, cmd_git_is_clean, cmd_lint, cmd_prettify, cmd_test, cmd_webpack,
};
pub use info::{cmd_eslint_config, cmd_licenses};
pub use setup::cmd_init;

fn load_config(cwd: &Path) -> Result<EssexConfig> {
    EssexConfig::load(cwd)
        .with_context(|| format!("Failed to load configuration from {}", cwd.display()))
}

fn create_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))
}
