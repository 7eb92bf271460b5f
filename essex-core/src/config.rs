//! TOML configuration for the build steps, read from `essex.toml`.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the optional workspace configuration.
pub const CONFIG_FILE: &str = "essex.toml";

/// Flags recognized by the lint command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintOptions {
    /// Let the linter and formatter rewrite files.
    #[serde(default)]
    pub fix: bool,
    /// Only format files staged in git.
    #[serde(default)]
    pub staged: bool,
    /// Also run the documentation step.
    #[serde(default)]
    pub docs: bool,
    /// Treat lint warnings as failures.
    #[serde(default)]
    pub strict: bool,
}

/// Workspace configuration as defined in `essex.toml`.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EssexConfig {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub lint: LintSettings,
    #[serde(default)]
    pub webpack: WebpackSettings,
    /// Project rule layer, applied after the built-in layers.
    #[serde(default)]
    pub rules: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub licenses: LicenseSettings,
}

/// Command lines of the external tools. The first element is the program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_eslint")]
    pub eslint: Vec<String>,
    #[serde(default = "default_pretty_quick")]
    pub pretty_quick: Vec<String>,
    #[serde(default = "default_webpack")]
    pub webpack: Vec<String>,
    /// Documentation commands, run in order.
    #[serde(default = "default_docs")]
    pub docs: Vec<Vec<String>>,
    #[serde(default = "default_test")]
    pub test: Vec<String>,
    /// Commit message linter, invoked from the `commit-msg` git hook.
    #[serde(default = "default_commit_msg")]
    pub commit_msg: Vec<String>,
    #[serde(default = "default_git")]
    pub git: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            eslint: default_eslint(),
            pretty_quick: default_pretty_quick(),
            webpack: default_webpack(),
            docs: default_docs(),
            test: default_test(),
            commit_msg: default_commit_msg(),
            git: default_git(),
        }
    }
}

fn default_eslint() -> Vec<String> {
    vec!["eslint".to_string()]
}

fn default_pretty_quick() -> Vec<String> {
    vec!["pretty-quick".to_string()]
}

fn default_webpack() -> Vec<String> {
    vec!["webpack".to_string()]
}

fn default_docs() -> Vec<Vec<String>> {
    vec![
        ["api-extractor", "run", "--local"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        ["api-documenter", "markdown", "-i", "dist/docs", "-o", "docs"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    ]
}

fn default_test() -> Vec<String> {
    vec!["jest".to_string()]
}

fn default_commit_msg() -> Vec<String> {
    ["commitlint", "-E", "HUSKY_GIT_PARAMS"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_git() -> Vec<String> {
    vec!["git".to_string()]
}

/// Inputs handed to the linter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintSettings {
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            extensions: default_extensions(),
        }
    }
}

fn default_patterns() -> Vec<String> {
    vec![".".to_string()]
}

fn default_extensions() -> Vec<String> {
    [".js", ".jsx", ".ts", ".tsx"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebpackSettings {
    #[serde(default = "default_webpack_config")]
    pub config: String,
    pub mode: Option<String>,
}

impl Default for WebpackSettings {
    fn default() -> Self {
        Self {
            config: default_webpack_config(),
            mode: None,
        }
    }
}

fn default_webpack_config() -> String {
    "webpack.config.js".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseSettings {
    /// Extra packages exempt from the license check.
    #[serde(default)]
    pub allowed_packages: Vec<String>,
}

impl EssexConfig {
    /// Loads `essex.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, dir.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|error| Error::Toml {
            error,
            context: path.display().to_string(),
        })
    }
}
