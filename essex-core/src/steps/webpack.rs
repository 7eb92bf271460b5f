//! Webpack compile wrapper.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::EssexConfig;
use crate::error::{Error, Result};
use crate::logger::{report, TaskLogger};
use crate::process::{tracing_sink, OutputSink, ToolCommand};

/// Subset of webpack's `--json` stats used for reporting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpackStats {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    /// Build time in milliseconds.
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub assets: Vec<StatsAsset>,
    #[serde(default)]
    pub warnings: Vec<StatsMessage>,
    #[serde(default)]
    pub errors: Vec<StatsMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsAsset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

/// Webpack 4 emits plain strings, webpack 5 emits objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatsMessage {
    Text(String),
    Detailed {
        message: String,
        #[serde(default, rename = "moduleName")]
        module_name: Option<String>,
    },
}

impl StatsMessage {
    pub fn message(&self) -> &str {
        match self {
            StatsMessage::Text(text) => text,
            StatsMessage::Detailed { message, .. } => message,
        }
    }

    fn render(&self, label: &str) -> String {
        match self {
            StatsMessage::Detailed {
                message,
                module_name: Some(module),
            } => format!("{} in {}\n{}", label, module, message),
            _ => format!("{}\n{}", label, self.message()),
        }
    }
}

impl WebpackStats {
    /// Parses stats JSON, tolerating leading non-JSON output.
    pub fn parse(stdout: &str) -> Result<Self> {
        let start = stdout
            .find('{')
            .ok_or_else(|| Error::Stats("no JSON object in compiler output".to_string()))?;
        Ok(serde_json::from_str(&stdout[start..])?)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Human-readable report, similar to webpack's own summary.
    pub fn to_report(&self) -> String {
        let mut out = String::new();
        let version = self
            .version
            .as_deref()
            .map(|v| format!("webpack {}", v))
            .unwrap_or_else(|| "webpack".to_string());
        let outcome = if self.has_errors() {
            format!("compiled with {} error(s)", self.errors.len())
        } else if !self.warnings.is_empty() {
            format!("compiled with {} warning(s)", self.warnings.len())
        } else {
            "compiled successfully".to_string()
        };
        let _ = write!(out, "{} {}", version, outcome);
        if let Some(time) = self.time {
            let _ = write!(out, " in {} ms", time);
        }
        if let Some(hash) = &self.hash {
            let _ = write!(out, " (hash {})", hash);
        }
        out.push('\n');

        let width = self.assets.iter().map(|a| a.name.len()).max().unwrap_or(0);
        for asset in &self.assets {
            let _ = writeln!(
                out,
                "  {:width$}  {}",
                asset.name,
                format_size(asset.size),
                width = width
            );
        }
        for warning in &self.warnings {
            let _ = writeln!(out, "\n{}", warning.render("WARNING"));
        }
        for error in &self.errors {
            let _ = writeln!(out, "\n{}", error.render("ERROR"));
        }
        out.trim_end().to_string()
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Stats of a finished compiler run together with its exit status.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub stats: WebpackStats,
    pub success: bool,
    pub exit_code: Option<i32>,
}

impl Compilation {
    /// A run that exited cleanly.
    pub fn succeeded(stats: WebpackStats) -> Self {
        Self {
            stats,
            success: true,
            exit_code: Some(0),
        }
    }
}

/// A compiler that runs once and reports its stats.
///
/// `Err` means the compiler could not be invoked or produced no stats.
/// Compilation errors are reported through [`WebpackStats::errors`].
#[async_trait]
pub trait Compiler: Send + Sync {
    async fn run(&self) -> Result<Compilation>;
}

/// Runs the compiler once, prints its stats, and logs the outcome as `webpack`.
///
/// Fails on stats errors and on a non-zero exit, even when the stats are clean.
pub async fn webpack_build(compiler: &dyn Compiler, logger: &dyn TaskLogger) -> Result<()> {
    let result = match compiler.run().await {
        Ok(compilation) => {
            let stats = &compilation.stats;
            logger.info(&stats.to_report());
            match stats.errors.first() {
                Some(first) => Err(Error::Compilation {
                    count: stats.errors.len(),
                    first: first.message().to_string(),
                }),
                None if !compilation.success => Err(Error::ToolFailed {
                    tool: "webpack".to_string(),
                    exit_code: compilation.exit_code,
                }),
                None => Ok(()),
            }
        }
        Err(e) => Err(e),
    };
    report("webpack", result, logger)
}

/// The webpack command line interface as a [`Compiler`].
pub struct WebpackCli {
    command_line: Vec<String>,
    config_file: String,
    mode: Option<String>,
    cwd: PathBuf,
    sink: OutputSink,
}

impl WebpackCli {
    pub fn new(config: &EssexConfig, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command_line: config.tools.webpack.clone(),
            config_file: config.webpack.config.clone(),
            mode: config.webpack.mode.clone(),
            cwd: cwd.into(),
            sink: tracing_sink(),
        }
    }

    pub fn with_config_file(mut self, config_file: impl Into<String>) -> Self {
        self.config_file = config_file.into();
        self
    }

    pub fn with_mode(mut self, mode: Option<String>) -> Self {
        if mode.is_some() {
            self.mode = mode;
        }
        self
    }

    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn command(&self) -> Result<ToolCommand> {
        // stdout carries the stats JSON, only stderr is forwarded
        let inner = self.sink.clone();
        let stderr_only: OutputSink = Arc::new(move |tool, line, is_stderr| {
            if is_stderr {
                inner(tool, line, true);
            }
        });

        let mut command = ToolCommand::from_command_line("webpack", &self.command_line, &self.cwd)?
            .with_sink(stderr_only)
            .args(["--config", self.config_file.as_str()]);
        if let Some(mode) = &self.mode {
            command = command.args(["--mode", mode.as_str()]);
        }
        Ok(command.arg("--json"))
    }
}

#[async_trait]
impl Compiler for WebpackCli {
    async fn run(&self) -> Result<Compilation> {
        let output = self.command()?.output().await?;
        match WebpackStats::parse(&output.stdout) {
            Ok(stats) => Ok(Compilation {
                stats,
                success: output.success,
                exit_code: output.exit_code,
            }),
            Err(parse_error) if output.success => Err(parse_error),
            Err(_) => Err(Error::ToolFailed {
                tool: output.tool,
                exit_code: output.exit_code,
            }),
        }
    }
}
