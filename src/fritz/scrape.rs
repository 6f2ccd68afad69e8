//! Status page row extraction.
//!
//! The DSL information page is a fixed table layout, so extraction is a
//! per-row regex against the normalized markup. Any structural surprise is
//! a hard error rather than a partial record: a row that went missing or
//! shows up twice means the firmware changed under us, and a half-filled
//! record in the ledger would be worse than none.

use std::fmt::Write as _;

use regex::Regex;

use crate::error::ScrapeError;

use super::stats::{DslStats, FIELD_COUNT, MetricSpec, MetricTable};

/// Trim the page and drop line breaks so every table row becomes one
/// contiguous run of markup for the row patterns below.
pub(crate) fn normalize_page(body: &str) -> String {
    body.trim().replace(['\r', '\n'], "")
}

fn row_pattern(spec: &MetricSpec) -> Regex {
    let mut pattern = String::from(r#"<tr><td class="c1[^"]*">"#);
    pattern.push_str(&regex::escape(spec.label));
    pattern.push_str("</td>");
    for cell in 0..spec.columns {
        let _ = write!(pattern, r#"<td class="c{}">(.*?)</td>"#, cell + 2);
    }
    pattern.push_str("</tr>");
    // Fixed scaffold plus an escaped label, always a valid pattern.
    Regex::new(&pattern).expect("row pattern")
}

/// Capture the value cells of exactly one row.
fn extract_row<'p>(page: &'p str, spec: &MetricSpec) -> Result<Vec<&'p str>, ScrapeError> {
    let pattern = row_pattern(spec);
    let mut matches = pattern.captures_iter(page);
    let caps = matches.next().ok_or(ScrapeError::RowMissing { label: spec.label })?;
    if matches.next().is_some() {
        return Err(ScrapeError::AmbiguousRow { label: spec.label });
    }
    let cells: Vec<&str> = (0..spec.columns)
        .map(|i| caps.get(i + 1).map_or("", |m| m.as_str()))
        .collect();
    // A tag inside a captured cell means the configured arity does not
    // match what the firmware renders.
    if cells.iter().any(|cell| cell.contains('<')) {
        return Err(ScrapeError::CellMarkup { label: spec.label });
    }
    Ok(cells)
}

/// Parse the whole status page into the fixed-order record.
pub(crate) fn parse_stats(body: &str, table: &MetricTable) -> Result<DslStats, ScrapeError> {
    let page = normalize_page(body);
    let mut values = Vec::with_capacity(FIELD_COUNT);
    for spec in table.specs() {
        let cells = extract_row(&page, spec)?;
        for &(_, cell) in spec.fields {
            // A cell beyond the captured arity (the fourth error counter on
            // three-column firmware) is recorded as empty; the record never
            // changes shape.
            values.push(cells.get(cell).copied().unwrap_or("").to_string());
        }
    }
    Ok(DslStats::from_values(values))
}
