//! Subprocess execution for external tools with streamed output.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::error::{Error, Result};

/// Receives each output line as `(tool, line, is_stderr)`.
pub type OutputSink = Arc<dyn Fn(&str, &str, bool) + Send + Sync>;

/// Sink that forwards tool output to `tracing` at debug level.
pub fn tracing_sink() -> OutputSink {
    Arc::new(|tool, line, is_stderr| {
        if is_stderr {
            tracing::debug!(tool, stderr = true, "{}", line);
        } else {
            tracing::debug!(tool, "{}", line);
        }
    })
}

/// Captured result of a finished tool process.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub tool: String,
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Converts a non-zero exit into [`Error::ToolFailed`].
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::ToolFailed {
                tool: self.tool,
                exit_code: self.exit_code,
            })
        }
    }
}

/// A single invocation of an external tool.
pub struct ToolCommand {
    tool: String,
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
    sink: OutputSink,
}

impl ToolCommand {
    /// Creates a command for `tool` from a configured command line.
    ///
    /// The first element is the program, the rest are leading arguments.
    pub fn from_command_line(
        tool: impl Into<String>,
        command_line: &[String],
        cwd: impl Into<PathBuf>,
    ) -> Result<Self> {
        let tool = tool.into();
        let (program, args) = command_line
            .split_first()
            .filter(|(program, _)| !program.trim().is_empty())
            .ok_or_else(|| Error::EmptyCommand(tool.clone()))?;

        Ok(Self {
            tool,
            program: program.clone(),
            args: args.to_vec(),
            cwd: cwd.into(),
            sink: tracing_sink(),
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The full command line, for logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the process to completion and captures its output.
    ///
    /// A non-zero exit is not an error here; see [`ToolCommand::run`].
    pub async fn output(self) -> Result<ToolOutput> {
        tracing::debug!(tool = %self.tool, cwd = %self.cwd.display(), "running {}", self.display());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::ToolSpawn {
                tool: self.tool.clone(),
                message: format!("{}: {}", self.program, e),
            })?;

        let stdout = child.stdout.take().ok_or_else(|| Error::ToolSpawn {
            tool: self.tool.clone(),
            message: "Failed to capture stdout".to_string(),
        })?;
        let stderr = child.stderr.take().ok_or_else(|| Error::ToolSpawn {
            tool: self.tool.clone(),
            message: "Failed to capture stderr".to_string(),
        })?;

        let (stdout, stderr) = tokio::join!(
            collect_lines(stdout, &self.tool, false, &self.sink),
            collect_lines(stderr, &self.tool, true, &self.sink),
        );
        let status = child.wait().await?;

        Ok(ToolOutput {
            tool: self.tool,
            success: status.success(),
            exit_code: status.code(),
            stdout: stdout?,
            stderr: stderr?,
        })
    }

    /// Runs the process and fails on a non-zero exit.
    pub async fn run(self) -> Result<ToolOutput> {
        self.output().await?.into_result()
    }
}

/// Reads until EOF; bytes that are not UTF-8 are replaced rather than failing the run.
async fn collect_lines<R>(
    reader: R,
    tool: &str,
    is_stderr: bool,
    sink: &OutputSink,
) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut captured = String::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            sink(tool, trimmed, is_stderr);
        }
        captured.push_str(line);
        captured.push('\n');
    }
    Ok(captured)
}
