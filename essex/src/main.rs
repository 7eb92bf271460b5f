mod commands;
mod formatting;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use essex_core::LintOptions;
use tracing::Level;

#[derive(Parser)]
#[command(name = "essex")]
#[command(about = "Build tooling for JavaScript and TypeScript monorepos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root to operate on.
    #[arg(long, default_value = ".")]
    cwd: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint code, check formatting and optionally build docs, in parallel.
    Lint {
        #[arg(long, action)]
        fix: bool,
        #[arg(long, action)]
        staged: bool,
        #[arg(long, action)]
        docs: bool,
        #[arg(long, action)]
        strict: bool,
        /// Only generate documentation.
        #[arg(long, action, conflicts_with_all = ["fix", "staged", "docs", "strict"])]
        docs_only: bool,
    },
    /// Format sources with pretty-quick.
    Prettify {
        #[arg(long, action)]
        staged: bool,
        #[arg(long, action, conflicts_with = "staged")]
        check: bool,
    },
    /// Generate API documentation.
    Docs,
    /// Compile with webpack.
    Webpack {
        #[arg(long)]
        config: Option<String>,
        #[arg(long)]
        mode: Option<String>,
    },
    /// Run the test runner, forwarding any extra arguments.
    Test {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Lint the commit message from the git hook.
    CommitMsg {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Fail when the working tree has uncommitted changes.
    GitIsClean,
    /// Add standard scripts and configuration files to a monorepo root.
    Init,
    /// Print the assembled ESLint configuration.
    EslintConfig {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print packages exempt from the license check.
    Licenses {
        #[arg(long, action)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lint {
            docs_only: true, ..
        } => commands::cmd_docs(cli.cwd)?,
        Commands::Lint {
            fix,
            staged,
            docs,
            strict,
            docs_only: false,
        } => commands::cmd_lint(
            cli.cwd,
            LintOptions {
                fix,
                staged,
                docs,
                strict,
            },
        )?,
        Commands::Prettify { staged, check } => commands::cmd_prettify(cli.cwd, staged, check)?,
        Commands::Docs => commands::cmd_docs(cli.cwd)?,
        Commands::Webpack { config, mode } => commands::cmd_webpack(cli.cwd, config, mode)?,
        Commands::Test { args } => commands::cmd_test(cli.cwd, args)?,
        Commands::CommitMsg { args } => commands::cmd_commit_msg(cli.cwd, args)?,
        Commands::GitIsClean => commands::cmd_git_is_clean(cli.cwd)?,
        Commands::Init => commands::cmd_init(cli.cwd)?,
        Commands::EslintConfig { out } => commands::cmd_eslint_config(cli.cwd, out)?,
        Commands::Licenses { json } => commands::cmd_licenses(cli.cwd, json)?,
    }

    Ok(())
}
