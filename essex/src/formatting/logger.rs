//! Console implementation of the task logger.

use std::sync::Arc;

use essex_core::{OutputSink, TaskLogger};
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use super::status::Status;

/// Prints task lines to stdout, pausing the spinner while printing.
#[derive(Default)]
pub struct ConsoleLogger {
    progress: Option<ProgressBar>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: ProgressBar) -> Self {
        Self {
            progress: Some(progress),
        }
    }

    fn print(&self, line: String) {
        match &self.progress {
            Some(pb) => pb.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }
}

impl TaskLogger for ConsoleLogger {
    fn info(&self, message: &str) {
        self.print(message.to_string());
    }

    fn subtask_success(&self, name: &str) {
        self.print(Status::Passed.line(name));
    }

    fn subtask_fail(&self, name: &str) {
        self.print(Status::Failed.line(name));
    }
}

/// Streams tool output with a `[tool]` prefix.
pub fn console_sink(progress: Option<ProgressBar>) -> OutputSink {
    Arc::new(move |tool, line, is_stderr| {
        let prefix = format!("[{}]", tool);
        let print = || {
            if is_stderr {
                eprintln!("  {} {}", prefix.bright_black().bold(), line.bright_red());
            } else {
                println!("  {} {}", prefix.bright_black().bold(), line);
            }
        };
        match &progress {
            Some(pb) => pb.suspend(print),
            None => print(),
        }
    })
}
