//! Commands that print generated configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use essex_core::rules::lint_config_for;
use essex_core::LicenseAllowList;
use owo_colors::OwoColorize;

use crate::formatting::{print_section_header, print_success, SectionStyle};

use super::load_config;

pub fn cmd_eslint_config(cwd: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let config = load_config(&cwd)?;
    let lint_config = lint_config_for(&cwd, &config);
    let json = lint_config.to_json_pretty()?;

    match out {
        Some(path) => {
            fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", json),
    }

    Ok(())
}

pub fn cmd_licenses(cwd: PathBuf, json: bool) -> Result<()> {
    let config = load_config(&cwd)?;
    let allow_list = LicenseAllowList::from_settings(&config.licenses);

    if json {
        println!("{}", serde_json::to_string_pretty(&allow_list)?);
    } else {
        print_section_header("Allowed packages", SectionStyle::Secondary);
        for name in allow_list.names() {
            println!("  {} {}", "→".cyan(), name.bold().white());
        }
        println!();
    }

    Ok(())
}
