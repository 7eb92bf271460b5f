//! Task logging sink shared by every build step.
//!
//! Components never print status lines themselves; they receive a
//! [`TaskLogger`] and report through it. The CLI installs a console logger,
//! tests install a [`MemoryLogger`].

use std::sync::Mutex;

use crate::error::Result;

/// Sink for task progress lines.
pub trait TaskLogger: Send + Sync {
    /// Free-form informational output.
    fn info(&self, message: &str);
    /// A named subtask finished successfully.
    fn subtask_success(&self, name: &str);
    /// A named subtask failed.
    fn subtask_fail(&self, name: &str);
}

/// Logs the outcome of a finished step under `name` and passes the result through.
pub fn report<T>(name: &str, result: Result<T>, logger: &dyn TaskLogger) -> Result<T> {
    match &result {
        Ok(_) => logger.subtask_success(name),
        Err(e) => {
            tracing::debug!(subtask = name, error = %e, "subtask failed");
            logger.subtask_fail(name);
        }
    }
    result
}

/// Logger that forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TaskLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn subtask_success(&self, name: &str) {
        tracing::info!(subtask = name, "success");
    }

    fn subtask_fail(&self, name: &str) {
        tracing::error!(subtask = name, "failed");
    }
}

/// A single recorded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Info(String),
    Success(String),
    Fail(String),
}

/// Logger that keeps every entry in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Names passed to `subtask_success`, in order.
    pub fn successes(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                LogEntry::Success(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Names passed to `subtask_fail`, in order.
    pub fn failures(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                LogEntry::Fail(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

impl TaskLogger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogEntry::Info(message.to_string()));
    }

    fn subtask_success(&self, name: &str) {
        self.push(LogEntry::Success(name.to_string()));
    }

    fn subtask_fail(&self, name: &str) {
        self.push(LogEntry::Fail(name.to_string()));
    }
}
