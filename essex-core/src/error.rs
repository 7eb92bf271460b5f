//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error in {context}: {error}")]
    Toml {
        error: toml::de::Error,
        context: String,
    },

    #[error("Failed to start {tool}: {message}")]
    ToolSpawn { tool: String, message: String },

    #[error("{tool} failed{}", describe_exit_code(.exit_code))]
    ToolFailed {
        tool: String,
        exit_code: Option<i32>,
    },

    #[error("No command configured for {0}")]
    EmptyCommand(String),

    #[error("Compilation failed with {count} error(s): {first}")]
    Compilation { count: usize, first: String },

    #[error("Could not read compiler stats: {0}")]
    Stats(String),

    #[error("Manifest not found: {0}. Run this command from the monorepo root.")]
    ManifestNotFound(PathBuf),

    #[error("Invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Working tree is not clean: {} changed path(s)", .0.len())]
    DirtyWorkTree(Vec<String>),

    #[error("Check '{check}' did not complete: {message}")]
    TaskJoin { check: String, message: String },
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::Toml {
            error,
            context: "essex.toml".to_string(),
        }
    }
}

fn describe_exit_code(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
