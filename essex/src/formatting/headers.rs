//! Section headers.

use owo_colors::{OwoColorize, Style};

#[derive(Debug, Clone, Copy)]
pub enum SectionStyle {
    /// Top-level step of a command, underlined.
    Primary,
    Secondary,
}

pub fn print_section_header(title: &str, style: SectionStyle) {
    match style {
        SectionStyle::Primary => {
            let accent = Style::new().cyan().bold();
            println!("{}", title.style(accent));
            println!("{}", "─".repeat(title.chars().count()).style(accent.dimmed()));
        }
        SectionStyle::Secondary => println!("{}", title.bright_black().bold()),
    }
    println!();
}
