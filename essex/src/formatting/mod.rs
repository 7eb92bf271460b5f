//! CLI output formatting: status lines, section headers, tables and the
//! console task logger.

mod headers;
mod logger;
mod output;
mod progress;
mod status;
mod tables;

pub use headers::{print_section_header, SectionStyle};
pub use logger::{console_sink, ConsoleLogger};
pub use output::{format_duration, print_separator_with_spacing, print_summary_box};
pub use progress::create_spinner;
pub use status::{print_error, print_info, print_success, print_warning};
pub use tables::print_check_table;
