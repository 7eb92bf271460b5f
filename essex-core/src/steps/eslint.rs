use std::path::PathBuf;

use async_trait::async_trait;

use crate::checks::Linter;
use crate::config::{EssexConfig, LintSettings};
use crate::error::Result;
use crate::process::{tracing_sink, OutputSink, ToolCommand};

/// Runs `eslint` over the configured patterns.
pub struct Eslint {
    command_line: Vec<String>,
    settings: LintSettings,
    cwd: PathBuf,
    sink: OutputSink,
}

impl Eslint {
    pub fn new(config: &EssexConfig, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command_line: config.tools.eslint.clone(),
            settings: config.lint.clone(),
            cwd: cwd.into(),
            sink: tracing_sink(),
        }
    }

    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    /// Builds the eslint invocation for the given flags.
    ///
    /// `strict` turns every warning into a failure via `--max-warnings 0`.
    pub fn command(&self, fix: bool, strict: bool) -> Result<ToolCommand> {
        let mut command = ToolCommand::from_command_line("eslint", &self.command_line, &self.cwd)?
            .with_sink(self.sink.clone())
            .args(self.settings.patterns.iter().cloned());

        if !self.settings.extensions.is_empty() {
            command = command
                .arg("--ext")
                .arg(self.settings.extensions.join(","));
        }
        if fix {
            command = command.arg("--fix");
        }
        if strict {
            command = command.args(["--max-warnings", "0"]);
        }
        Ok(command)
    }
}

#[async_trait]
impl Linter for Eslint {
    async fn lint(&self, fix: bool, strict: bool) -> Result<()> {
        self.command(fix, strict)?.run().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_plain_invocation() {
        let eslint = Eslint::new(&EssexConfig::default(), ".");
        let command = eslint.command(false, false).unwrap();
        assert_eq!(command.program(), "eslint");
        assert_eq!(command.get_args(), &[".", "--ext", ".js,.jsx,.ts,.tsx"]);
    }

    #[test]
    fn fix_and_strict_add_flags() {
        let eslint = Eslint::new(&EssexConfig::default(), ".");
        let command = eslint.command(true, true).unwrap();
        assert_eq!(
            command.display(),
            "eslint . --ext .js,.jsx,.ts,.tsx --fix --max-warnings 0"
        );
    }

    #[test]
    fn configured_prefix_is_kept() {
        let mut config = EssexConfig::default();
        config.tools.eslint = vec!["yarn".to_string(), "eslint".to_string()];
        config.lint.patterns = vec!["src".to_string()];
        config.lint.extensions.clear();
        let command = Eslint::new(&config, ".").command(false, false).unwrap();
        assert_eq!(command.display(), "yarn eslint src");
    }
}
