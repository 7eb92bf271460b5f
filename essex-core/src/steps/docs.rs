use std::path::PathBuf;

use async_trait::async_trait;

use crate::checks::DocGenerator;
use crate::config::EssexConfig;
use crate::error::{Error, Result};
use crate::process::{tracing_sink, OutputSink, ToolCommand};

/// Generates API documentation by running each configured command in turn.
pub struct Docs {
    commands: Vec<Vec<String>>,
    cwd: PathBuf,
    sink: OutputSink,
}

impl Docs {
    pub fn new(config: &EssexConfig, cwd: impl Into<PathBuf>) -> Self {
        Self {
            commands: config.tools.docs.clone(),
            cwd: cwd.into(),
            sink: tracing_sink(),
        }
    }

    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn commands(&self) -> Result<Vec<ToolCommand>> {
        if self.commands.is_empty() {
            return Err(Error::EmptyCommand("docs".to_string()));
        }
        self.commands
            .iter()
            .map(|line| {
                ToolCommand::from_command_line("docs", line, &self.cwd)
                    .map(|c| c.with_sink(self.sink.clone()))
            })
            .collect()
    }
}

#[async_trait]
impl DocGenerator for Docs {
    async fn generate(&self) -> Result<()> {
        for command in self.commands()? {
            command.run().await?;
        }
        Ok(())
    }
}
