use std::path::PathBuf;

use async_trait::async_trait;

use crate::checks::{FormatMode, Formatter};
use crate::config::EssexConfig;
use crate::error::Result;
use crate::process::{tracing_sink, OutputSink, ToolCommand};

/// Runs `pretty-quick` in one of its three modes.
pub struct PrettyQuick {
    command_line: Vec<String>,
    cwd: PathBuf,
    sink: OutputSink,
}

impl PrettyQuick {
    pub fn new(config: &EssexConfig, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command_line: config.tools.pretty_quick.clone(),
            cwd: cwd.into(),
            sink: tracing_sink(),
        }
    }

    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn command(&self, mode: FormatMode) -> Result<ToolCommand> {
        let command =
            ToolCommand::from_command_line("pretty-quick", &self.command_line, &self.cwd)?
                .with_sink(self.sink.clone());
        Ok(match mode {
            FormatMode::Staged => command.arg("--staged"),
            FormatMode::Check => command.arg("--check"),
            FormatMode::Fix => command,
        })
    }
}

#[async_trait]
impl Formatter for PrettyQuick {
    async fn format(&self, mode: FormatMode) -> Result<()> {
        self.command(mode)?.run().await?;
        Ok(())
    }
}
