//! Commands that drive external tools.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use essex_core::checks::{DocGenerator, FormatMode, Formatter};
use essex_core::{
    configure_checks, report, webpack_build, Docs, Error, GitStatus, LintOptions, Passthrough,
    PrettyQuick, TaskLogger, Toolchain, WebpackCli,
};

use crate::formatting::{
    console_sink, create_spinner, format_duration, print_check_table, print_error,
    print_section_header, print_separator_with_spacing, print_success, print_summary_box,
    print_warning, ConsoleLogger, SectionStyle,
};

use super::{create_runtime, load_config};

pub fn cmd_lint(cwd: PathBuf, options: LintOptions) -> Result<()> {
    let start = Instant::now();
    let config = load_config(&cwd)?;

    print_section_header("Linting", SectionStyle::Primary);

    let spinner = create_spinner("Running checks...");
    let logger: Arc<dyn TaskLogger> = Arc::new(ConsoleLogger::with_progress(spinner.clone()));
    let toolchain =
        Toolchain::from_config(&config, &cwd, console_sink(Some(spinner.clone())), logger);

    let rt = create_runtime()?;
    let outcome = rt.block_on(configure_checks(options, toolchain).run());
    spinner.finish_and_clear();

    println!();
    print_check_table(outcome.outcomes());

    let failed = outcome.failed_checks();
    if failed.is_empty() {
        print_success("All checks passed");
    } else {
        let names: Vec<&str> = failed.iter().map(|c| c.label()).collect();
        print_warning(&format!("Failed checks: {}", names.join(", ")));
    }

    print_separator_with_spacing();
    print_summary_box(
        "Summary",
        &[("Duration", &format_duration(start.elapsed().as_secs_f64()))],
    );
    println!();

    if let Err(e) = outcome.into_result() {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

pub fn cmd_prettify(cwd: PathBuf, staged: bool, check: bool) -> Result<()> {
    let config = load_config(&cwd)?;
    let mode = if staged {
        FormatMode::Staged
    } else if check {
        FormatMode::Check
    } else {
        FormatMode::Fix
    };

    let logger = ConsoleLogger::new();
    let formatter = PrettyQuick::new(&config, &cwd).with_sink(console_sink(None));
    let rt = create_runtime()?;
    let result = rt.block_on(formatter.format(mode));
    exit_on_failure(report("pretty-quick", result, &logger))
}

pub fn cmd_docs(cwd: PathBuf) -> Result<()> {
    let config = load_config(&cwd)?;

    let logger = ConsoleLogger::new();
    let docs = Docs::new(&config, &cwd).with_sink(console_sink(None));
    let rt = create_runtime()?;
    let result = rt.block_on(docs.generate());
    exit_on_failure(report("docs", result, &logger))
}

pub fn cmd_webpack(cwd: PathBuf, config_file: Option<String>, mode: Option<String>) -> Result<()> {
    let start = Instant::now();
    let config = load_config(&cwd)?;

    print_section_header("Compiling", SectionStyle::Primary);

    let spinner = create_spinner("Running webpack...");
    let logger = ConsoleLogger::with_progress(spinner.clone());
    let mut compiler = WebpackCli::new(&config, &cwd)
        .with_mode(mode)
        .with_sink(console_sink(Some(spinner.clone())));
    if let Some(file) = config_file {
        compiler = compiler.with_config_file(file);
    }

    let rt = create_runtime()?;
    let result = rt.block_on(webpack_build(&compiler, &logger));
    spinner.finish_and_clear();

    print_separator_with_spacing();
    print_summary_box(
        "Summary",
        &[("Duration", &format_duration(start.elapsed().as_secs_f64()))],
    );
    println!();

    exit_on_failure(result)
}

pub fn cmd_test(cwd: PathBuf, args: Vec<String>) -> Result<()> {
    let config = load_config(&cwd)?;
    run_passthrough(Passthrough::test(&config, &cwd), &args)
}

pub fn cmd_commit_msg(cwd: PathBuf, args: Vec<String>) -> Result<()> {
    let config = load_config(&cwd)?;
    run_passthrough(Passthrough::commit_msg(&config, &cwd), &args)
}

fn run_passthrough(step: Passthrough, args: &[String]) -> Result<()> {
    let logger = ConsoleLogger::new();
    let step = step.with_sink(console_sink(None));
    let rt = create_runtime()?;
    let result = rt.block_on(step.run(args));
    exit_on_failure(report(step.name(), result, &logger))
}

pub fn cmd_git_is_clean(cwd: PathBuf) -> Result<()> {
    let config = load_config(&cwd)?;

    let git = GitStatus::new(&config, &cwd);
    let rt = create_runtime()?;
    let result = rt.block_on(git.ensure_clean());
    if let Err(Error::DirtyWorkTree(paths)) = &result {
        for path in paths {
            print_warning(path);
        }
    }
    exit_on_failure(report("git-is-clean", result, &ConsoleLogger::new()))
}

/// The step already logged its failure; print the cause and exit non-zero.
fn exit_on_failure(result: essex_core::Result<()>) -> Result<()> {
    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}
