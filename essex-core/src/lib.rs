//! Core library for the essex build tooling: lint task composition, lint
//! configuration assembly, tool invocation and monorepo bootstrapping.

pub mod checks;
pub mod config;
pub mod error;
pub mod init;
pub mod licenses;
pub mod logger;
pub mod process;
pub mod rules;
pub mod steps;

pub use checks::{
    configure_checks, CheckOutcome, CheckStatus, CombinedOutcome, CombinedTask, DocGenerator,
    FormatMode, Formatter, Linter, SubCheck, Toolchain,
};
pub use config::{EssexConfig, LintOptions};
pub use error::{Error, Result};
pub use init::{InitSummary, Initializer};
pub use licenses::LicenseAllowList;
pub use logger::{report, LogEntry, MemoryLogger, TaskLogger, TracingLogger};
pub use process::{OutputSink, ToolCommand, ToolOutput};
pub use rules::{
    build_lint_config, lint_config_for, resolve_header, HeaderSource, LintConfig, RuleLayer,
    RuleSet, RuleSetBuilder,
};
pub use steps::{
    webpack_build, Compilation, Compiler, Docs, Eslint, GitStatus, Passthrough, PrettyQuick,
    WebpackCli, WebpackStats,
};
