//! Status markers for task results and messages.

use essex_core::CheckStatus;
use owo_colors::{OwoColorize, Style};

/// Marker shown in front of a task name or message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Passed,
    Failed,
    Warning,
    Note,
    Skipped,
}

impl Status {
    pub fn symbol(self) -> &'static str {
        match self {
            Status::Passed => "✓",
            Status::Failed => "✗",
            Status::Warning => "!",
            Status::Note => "›",
            Status::Skipped => "○",
        }
    }

    /// Same palette as [`Status::line`], for the check table.
    pub fn table_color(self) -> comfy_table::Color {
        match self {
            Status::Passed => comfy_table::Color::Green,
            Status::Failed => comfy_table::Color::Red,
            Status::Warning => comfy_table::Color::Yellow,
            Status::Note => comfy_table::Color::Cyan,
            Status::Skipped => comfy_table::Color::DarkGrey,
        }
    }

    fn style(self) -> Style {
        match self {
            Status::Passed => Style::new().green().bold(),
            Status::Failed => Style::new().red().bold(),
            Status::Warning => Style::new().yellow().bold(),
            Status::Note => Style::new().cyan(),
            Status::Skipped => Style::new().bright_black(),
        }
    }

    /// An indented, colored status line.
    pub fn line(self, message: &str) -> String {
        let style = self.style();
        format!("  {} {}", self.symbol().style(style), message.style(style))
    }
}

impl From<CheckStatus> for Status {
    fn from(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Passed => Status::Passed,
            CheckStatus::Failed => Status::Failed,
            CheckStatus::Skipped => Status::Skipped,
        }
    }
}

pub fn print_success(message: &str) {
    println!("{}", Status::Passed.line(message));
}

pub fn print_error(message: &str) {
    println!("{}", Status::Failed.line(message));
}

pub fn print_warning(message: &str) {
    println!("{}", Status::Warning.line(message));
}

pub fn print_info(message: &str) {
    println!("{}", Status::Note.line(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_status_mapping() {
        assert_eq!(Status::from(CheckStatus::Passed), Status::Passed);
        assert_eq!(Status::from(CheckStatus::Failed), Status::Failed);
        assert_eq!(Status::from(CheckStatus::Skipped).symbol(), "○");
    }

    #[test]
    fn line_keeps_message() {
        let line = Status::Note.line("package.json already configured");
        assert!(line.contains("package.json already configured"));
    }
}
