use comfy_table::{
    Attribute, Cell, CellAlignment, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::consts::DATE_FORMAT;
use crate::fritz::DslStats;
use crate::report::{CounterSummary, DayReport};

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn right_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Print one polled record as a field/value table, in ledger order.
pub(crate) fn print_stats_table(stats: &DslStats) {
    let mut table = create_styled_table();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    for (name, value) in stats.iter() {
        table.add_row(vec![Cell::new(name), right_cell(value)]);
    }
    println!("{table}");
}

fn summary_row(label: &str, summary: &CounterSummary) -> Vec<Cell> {
    vec![
        Cell::new(label),
        right_cell(&summary.min.to_string()),
        right_cell(&format!("{:.0}", summary.avg)),
        right_cell(&summary.max.to_string()),
    ]
}

/// Print a day summary table plus the sample range underneath.
pub(crate) fn print_report_table(report: &DayReport) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell(&report.date.format(DATE_FORMAT).to_string()),
        header_cell("Min"),
        header_cell("Avg"),
        header_cell("Max"),
    ]);
    table.add_row(summary_row("Throughput down (kbit/s)", &report.throughput_down));
    table.add_row(summary_row("Throughput up (kbit/s)", &report.throughput_up));
    println!("{table}");
    println!(
        "\n  {} samples, {} to {}\n",
        report.samples, report.first_timestamp, report.last_timestamp
    );
}
