use std::path::PathBuf;

use crate::config::EssexConfig;
use crate::error::Result;
use crate::process::{tracing_sink, OutputSink, ToolCommand};

/// A configured tool run with the caller's extra arguments appended.
///
/// Backs the `test` and `commit-msg` commands, whose work is done entirely by
/// the underlying tool.
pub struct Passthrough {
    name: &'static str,
    command_line: Vec<String>,
    cwd: PathBuf,
    sink: OutputSink,
}

impl Passthrough {
    pub fn test(config: &EssexConfig, cwd: impl Into<PathBuf>) -> Self {
        Self::new("test", config.tools.test.clone(), cwd)
    }

    pub fn commit_msg(config: &EssexConfig, cwd: impl Into<PathBuf>) -> Self {
        Self::new("commit-msg", config.tools.commit_msg.clone(), cwd)
    }

    fn new(name: &'static str, command_line: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            name,
            command_line,
            cwd: cwd.into(),
            sink: tracing_sink(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn command(&self, extra_args: &[String]) -> Result<ToolCommand> {
        Ok(
            ToolCommand::from_command_line(self.name, &self.command_line, &self.cwd)?
                .with_sink(self.sink.clone())
                .args(extra_args.iter().cloned()),
        )
    }

    pub async fn run(&self, extra_args: &[String]) -> Result<()> {
        self.command(extra_args)?.run().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_args_are_appended() {
        let step = Passthrough::test(&EssexConfig::default(), ".");
        let command = step
            .command(&["--coverage".to_string(), "src".to_string()])
            .unwrap();
        assert_eq!(command.display(), "jest --coverage src");
    }

    #[test]
    fn commit_msg_reads_hook_params() {
        let step = Passthrough::commit_msg(&EssexConfig::default(), ".");
        assert_eq!(step.name(), "commit-msg");
        assert_eq!(
            step.command(&[]).unwrap().display(),
            "commitlint -E HUSKY_GIT_PARAMS"
        );
    }
}
