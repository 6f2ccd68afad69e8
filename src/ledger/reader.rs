//! Read one day's ledger file back for reporting.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::PersistenceError;
use crate::fritz::stats::FIELD_COUNT;

use super::{day_file_name, expected_header};

/// One parsed ledger line: the compact timestamp plus the raw values in
/// ledger order. `values` always holds [`FIELD_COUNT`] entries.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LedgerRow {
    pub(crate) timestamp: String,
    pub(crate) values: Vec<String>,
}

/// The parsed content of one day file.
#[derive(Debug)]
pub(crate) struct DayLog {
    pub(crate) path: PathBuf,
    pub(crate) date: NaiveDate,
    pub(crate) rows: Vec<LedgerRow>,
}

pub(crate) fn read_day(dir: &Path, date: NaiveDate) -> Result<DayLog, PersistenceError> {
    let path = dir.join(day_file_name(date));
    let io_err = |source| PersistenceError::Io {
        path: path.clone(),
        source,
    };

    let file = File::open(&path).map_err(io_err)?;
    let header = expected_header();
    let mut rows = Vec::new();

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(io_err)?;
        if index == 0 {
            if line != header {
                return Err(PersistenceError::HeaderMismatch {
                    path: path.clone(),
                    found: line.split(',').count(),
                    expected: FIELD_COUNT + 1,
                });
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }
        let mut fields = split_csv_line(&line);
        if fields.len() != FIELD_COUNT + 1 {
            return Err(PersistenceError::MalformedRow {
                path: path.clone(),
                line: index + 1,
                found: fields.len(),
                expected: FIELD_COUNT + 1,
            });
        }
        let timestamp = fields.remove(0);
        rows.push(LedgerRow {
            timestamp,
            values: fields,
        });
    }

    Ok(DayLog { path, date, rows })
}

/// Split one CSV line, undoing the writer's quoting.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if current.is_empty() => quoted = true,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
