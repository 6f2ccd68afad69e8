//! Day-partitioned append-only CSV persistence.
//!
//! One file per local calendar day, named `YYYYMMDD.csv`, every file
//! carrying the same header. The format is the long-term archive of this
//! tool, so the writer refuses to touch a file whose header differs from
//! the current field order instead of silently mixing schemas.

pub(crate) mod reader;
pub(crate) mod writer;

pub(crate) use reader::{DayLog, LedgerRow, read_day};
pub(crate) use writer::append;

use chrono::NaiveDate;

use crate::consts::FILE_DATE_FORMAT;
use crate::fritz::stats::field_names;

/// File name for one calendar day.
pub(crate) fn day_file_name(date: NaiveDate) -> String {
    format!("{}.csv", date.format(FILE_DATE_FORMAT))
}

/// The exact header line every ledger file must carry.
pub(crate) fn expected_header() -> String {
    let mut header = String::from("timestamp");
    for name in field_names() {
        header.push(',');
        header.push_str(name);
    }
    header
}

/// Quote a value that would otherwise break the column structure.
pub(crate) fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
