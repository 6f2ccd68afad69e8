mod json;
mod table;

pub(crate) use json::{report_json, stats_json};
pub(crate) use table::{print_report_table, print_stats_table};
