//! Monorepo initialization command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use essex_core::Initializer;

use crate::formatting::{
    print_info, print_section_header, print_success, print_warning, ConsoleLogger, SectionStyle,
};

pub fn cmd_init(cwd: PathBuf) -> Result<()> {
    print_section_header("Initializing monorepo", SectionStyle::Primary);

    let initializer = Initializer::new(&cwd, Arc::new(ConsoleLogger::new()));
    let summary = initializer.run()?;

    println!();
    if summary.manifest_written {
        print_success(&format!("Updated {}", initializer.manifest_path().display()));
    } else {
        print_info("package.json already configured");
    }
    for name in &summary.copied {
        print_success(&format!("Created {}", name));
    }
    for name in &summary.skipped {
        print_warning(&format!("Kept existing {}", name));
    }
    println!();

    Ok(())
}
