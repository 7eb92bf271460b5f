//! General output formatting utilities.

use owo_colors::OwoColorize;

pub fn print_separator_with_spacing() {
    println!();
    println!("{}", "─".repeat(60).bright_black());
    println!();
}

/// Prints a summary box with statistics.
pub fn print_summary_box(title: &str, items: &[(&str, &str)]) {
    let title_colored = title.cyan().bold().to_string();
    let separator = "─".repeat(50);
    println!("┌─ {} {}", title_colored, separator.bright_black());
    for (key, value) in items {
        println!("│ {} {}", key.bright_black().bold(), value.bold().white());
    }
    println!("└{}", "─".repeat(60).bright_black());
}

/// Formats duration in a human-readable way.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.2}s", seconds)
    } else {
        let mins = (seconds / 60.0) as u64;
        let secs = seconds % 60.0;
        format!("{}m {:.1}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(0.25), "250ms");
        assert_eq!(format_duration(2.5), "2.50s");
        assert_eq!(format_duration(90.0), "1m 30.0s");
    }
}
