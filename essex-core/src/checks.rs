//! Lint task composition: code, formatting and documentation checks run
//! side by side and are reported as one combined outcome.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::config::{EssexConfig, LintOptions};
use crate::error::{Error, Result};
use crate::logger::{report, TaskLogger};
use crate::process::OutputSink;
use crate::steps::{Docs, Eslint, PrettyQuick};

/// Source linter.
#[async_trait]
pub trait Linter: Send + Sync {
    async fn lint(&self, fix: bool, strict: bool) -> Result<()>;
}

/// Source formatter.
#[async_trait]
pub trait Formatter: Send + Sync {
    async fn format(&self, mode: FormatMode) -> Result<()>;
}

/// API documentation generator.
#[async_trait]
pub trait DocGenerator: Send + Sync {
    async fn generate(&self) -> Result<()>;
}

/// How the formatter treats files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Format staged files only, writing changes.
    Staged,
    /// Report unformatted files without touching them.
    Check,
    /// Rewrite unformatted files.
    Fix,
}

impl FormatMode {
    /// `staged` wins over `fix`.
    pub fn from_options(options: &LintOptions) -> Self {
        if options.staged {
            FormatMode::Staged
        } else if options.fix {
            FormatMode::Fix
        } else {
            FormatMode::Check
        }
    }
}

/// The collaborators a combined lint task drives.
#[derive(Clone)]
pub struct Toolchain {
    pub linter: Arc<dyn Linter>,
    pub formatter: Arc<dyn Formatter>,
    pub docs: Arc<dyn DocGenerator>,
    pub logger: Arc<dyn TaskLogger>,
}

impl Toolchain {
    pub fn new(
        linter: Arc<dyn Linter>,
        formatter: Arc<dyn Formatter>,
        docs: Arc<dyn DocGenerator>,
        logger: Arc<dyn TaskLogger>,
    ) -> Self {
        Self {
            linter,
            formatter,
            docs,
            logger,
        }
    }

    /// The external-tool toolchain described by `essex.toml`.
    pub fn from_config(
        config: &EssexConfig,
        cwd: &Path,
        sink: OutputSink,
        logger: Arc<dyn TaskLogger>,
    ) -> Self {
        Self::new(
            Arc::new(Eslint::new(config, cwd).with_sink(sink.clone())),
            Arc::new(PrettyQuick::new(config, cwd).with_sink(sink.clone())),
            Arc::new(Docs::new(config, cwd).with_sink(sink)),
            logger,
        )
    }
}

/// One of the three independent checks of the lint command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubCheck {
    Code,
    Formatting,
    Documentation,
}

impl SubCheck {
    pub const ALL: [SubCheck; 3] = [SubCheck::Code, SubCheck::Formatting, SubCheck::Documentation];

    /// Name used for success/fail log lines.
    pub fn task_name(&self) -> &'static str {
        match self {
            SubCheck::Code => "eslint",
            SubCheck::Formatting => "pretty-quick",
            SubCheck::Documentation => "docs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubCheck::Code => "code",
            SubCheck::Formatting => "formatting",
            SubCheck::Documentation => "documentation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

/// Result of a single sub-check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub check: SubCheck,
    pub status: CheckStatus,
    pub elapsed: Duration,
}

/// Outcome of a combined task once every sub-check has finished.
#[derive(Debug)]
pub struct CombinedOutcome {
    outcomes: Vec<CheckOutcome>,
    first_error: Option<(SubCheck, Error)>,
}

impl CombinedOutcome {
    pub fn is_success(&self) -> bool {
        self.first_error.is_none()
    }

    /// Outcomes in completion order.
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, check: SubCheck) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.check == check)
    }

    pub fn failed_checks(&self) -> Vec<SubCheck> {
        self.outcomes
            .iter()
            .filter(|o| o.status == CheckStatus::Failed)
            .map(|o| o.check)
            .collect()
    }

    /// The sub-check whose failure completed first, if any.
    pub fn first_failure(&self) -> Option<SubCheck> {
        self.first_error.as_ref().map(|(check, _)| *check)
    }

    /// `Err` with the first failure encountered, `Ok` when all passed.
    pub fn into_result(self) -> Result<()> {
        match self.first_error {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }
}

/// Sub-checks configured from [`LintOptions`], ready to run.
pub struct CombinedTask {
    options: LintOptions,
    toolchain: Toolchain,
}

/// Builds the combined lint task for the given flags.
pub fn configure_checks(options: LintOptions, toolchain: Toolchain) -> CombinedTask {
    CombinedTask { options, toolchain }
}

impl CombinedTask {
    pub fn options(&self) -> &LintOptions {
        &self.options
    }

    /// Starts all sub-checks at once and waits for every one of them.
    ///
    /// Each sub-check is logged as soon as it finishes. A failure never
    /// cancels the remaining checks.
    pub async fn run(self) -> CombinedOutcome {
        let (tx, mut rx) = mpsc::unbounded_channel::<(SubCheck, Option<Result<()>>, Duration)>();
        let mut handles = Vec::with_capacity(SubCheck::ALL.len());

        for check in SubCheck::ALL {
            let toolchain = self.toolchain.clone();
            let options = self.options;
            let tx = tx.clone();
            let handle = tokio::spawn(async move {
                let start = Instant::now();
                let result = match run_check(check, &options, &toolchain).await {
                    Some(result) => {
                        Some(report(check.task_name(), result, toolchain.logger.as_ref()))
                    }
                    None => {
                        tracing::debug!(check = check.label(), "skipped");
                        None
                    }
                };
                let _ = tx.send((check, result, start.elapsed()));
            });
            handles.push((check, handle));
        }
        drop(tx);

        let mut outcomes = Vec::with_capacity(SubCheck::ALL.len());
        let mut first_error = None;

        while let Some((check, result, elapsed)) = rx.recv().await {
            let status = match result {
                None => CheckStatus::Skipped,
                Some(Ok(())) => CheckStatus::Passed,
                Some(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some((check, e));
                    }
                    CheckStatus::Failed
                }
            };
            outcomes.push(CheckOutcome {
                check,
                status,
                elapsed,
            });
        }

        // a check that panicked never reported; surface it through its handle
        for (check, handle) in handles {
            if let Err(e) = handle.await {
                self.toolchain.logger.subtask_fail(check.task_name());
                outcomes.push(CheckOutcome {
                    check,
                    status: CheckStatus::Failed,
                    elapsed: Duration::ZERO,
                });
                if first_error.is_none() {
                    first_error = Some((
                        check,
                        Error::TaskJoin {
                            check: check.label().to_string(),
                            message: e.to_string(),
                        },
                    ));
                }
            }
        }

        CombinedOutcome {
            outcomes,
            first_error,
        }
    }
}

/// `None` when the check is disabled by the options.
async fn run_check(
    check: SubCheck,
    options: &LintOptions,
    toolchain: &Toolchain,
) -> Option<Result<()>> {
    match check {
        SubCheck::Code => Some(toolchain.linter.lint(options.fix, options.strict).await),
        SubCheck::Formatting => Some(
            toolchain
                .formatter
                .format(FormatMode::from_options(options))
                .await,
        ),
        SubCheck::Documentation => {
            if options.docs {
                Some(toolchain.docs.generate().await)
            } else {
                None
            }
        }
    }
}
