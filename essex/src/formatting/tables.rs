//! Table formatting utilities using comfy-table.

use comfy_table::{Cell, Table};
use essex_core::{CheckOutcome, CheckStatus};

use super::output::format_duration;
use super::status::Status;

/// Prints one row per sub-check.
pub fn print_check_table(outcomes: &[CheckOutcome]) {
    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("Status").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Check").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Tool").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Time").add_attribute(comfy_table::Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    for outcome in outcomes {
        let status = Status::from(outcome.status);
        let time = match outcome.status {
            CheckStatus::Skipped => String::new(),
            _ => format_duration(outcome.elapsed.as_secs_f64()),
        };
        table.add_row(vec![
            Cell::new(status.symbol()).fg(status.table_color()),
            Cell::new(outcome.check.label()).fg(comfy_table::Color::White),
            Cell::new(outcome.check.task_name()).fg(comfy_table::Color::DarkGrey),
            Cell::new(time).fg(comfy_table::Color::DarkGrey),
        ]);
    }

    println!("{}", table);
}
