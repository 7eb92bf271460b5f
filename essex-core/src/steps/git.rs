use std::path::PathBuf;

use crate::config::EssexConfig;
use crate::error::{Error, Result};
use crate::process::{tracing_sink, OutputSink, ToolCommand};

/// Checks that a build left no uncommitted changes behind.
pub struct GitStatus {
    command_line: Vec<String>,
    cwd: PathBuf,
    sink: OutputSink,
}

impl GitStatus {
    pub fn new(config: &EssexConfig, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command_line: config.tools.git.clone(),
            cwd: cwd.into(),
            sink: tracing_sink(),
        }
    }

    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn command(&self) -> Result<ToolCommand> {
        Ok(
            ToolCommand::from_command_line("git", &self.command_line, &self.cwd)?
                .with_sink(self.sink.clone())
                .args(["status", "--porcelain"]),
        )
    }

    /// Paths reported by `git status --porcelain`.
    pub async fn changed_paths(&self) -> Result<Vec<String>> {
        let output = self.command()?.run().await?;
        Ok(parse_porcelain(&output.stdout))
    }

    pub async fn ensure_clean(&self) -> Result<()> {
        let changed = self.changed_paths().await?;
        if changed.is_empty() {
            Ok(())
        } else {
            Err(Error::DirtyWorkTree(changed))
        }
    }
}

/// Porcelain lines are `XY <path>`; renames keep only the new path.
fn parse_porcelain(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| line.len() > 3)
        .map(|line| {
            let path = &line[3..];
            match path.split_once(" -> ") {
                Some((_, to)) => to.to_string(),
                None => path.to_string(),
            }
        })
        .collect()
}
