//! Numeric day summaries over the raw ledger.
//!
//! The scrape layer stores text verbatim, so this module is where a value
//! is first treated as a number. A non-numeric value is its own error
//! instead of a silent zero.

use chrono::NaiveDate;

use crate::error::ValueError;
use crate::fritz::stats::field_names;
use crate::ledger::{DayLog, LedgerRow};

/// min/avg/max of one field across a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CounterSummary {
    pub(crate) min: u64,
    pub(crate) max: u64,
    pub(crate) avg: f64,
}

#[derive(Debug)]
pub(crate) struct DayReport {
    pub(crate) date: NaiveDate,
    pub(crate) samples: usize,
    pub(crate) first_timestamp: String,
    pub(crate) last_timestamp: String,
    pub(crate) throughput_down: CounterSummary,
    pub(crate) throughput_up: CounterSummary,
}

impl DayReport {
    /// Summarize one day file. `None` when the file holds a header but no
    /// samples yet.
    pub(crate) fn build(log: &DayLog) -> Result<Option<DayReport>, ValueError> {
        let Some(first) = log.rows.first() else {
            return Ok(None);
        };
        let last = log.rows.last().unwrap_or(first);
        Ok(Some(DayReport {
            date: log.date,
            samples: log.rows.len(),
            first_timestamp: first.timestamp.clone(),
            last_timestamp: last.timestamp.clone(),
            throughput_down: summarize(&log.rows, "current_throughput_down")?,
            throughput_up: summarize(&log.rows, "current_throughput_up")?,
        }))
    }
}

/// Interpret one raw ledger value as a counter.
pub(crate) fn parse_counter(field: &'static str, raw: &str) -> Result<u64, ValueError> {
    raw.trim().parse().map_err(|_| ValueError::NotNumeric {
        field,
        value: raw.to_string(),
    })
}

fn summarize(rows: &[LedgerRow], field: &'static str) -> Result<CounterSummary, ValueError> {
    let index = field_index(field);
    let mut min = u64::MAX;
    let mut max = 0u64;
    // Wide accumulator; a day of u64-range counters must not overflow.
    let mut sum = 0u128;
    for row in rows {
        let value = parse_counter(field, &row.values[index])?;
        min = min.min(value);
        max = max.max(value);
        sum += u128::from(value);
    }
    Ok(CounterSummary {
        min,
        max,
        avg: sum as f64 / rows.len() as f64,
    })
}

fn field_index(field: &'static str) -> usize {
    match field_names().position(|name| name == field) {
        Some(index) => index,
        None => unreachable!("unknown field {field}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fritz::stats::FIELD_COUNT;
    use std::path::PathBuf;

    fn row(timestamp: &str, down: &str, up: &str) -> LedgerRow {
        let mut values: Vec<String> = vec![String::new(); FIELD_COUNT];
        values[field_index("current_throughput_down")] = down.to_string();
        values[field_index("current_throughput_up")] = up.to_string();
        LedgerRow {
            timestamp: timestamp.to_string(),
            values,
        }
    }

    fn log(rows: Vec<LedgerRow>) -> DayLog {
        DayLog {
            path: PathBuf::from("20250115.csv"),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            rows,
        }
    }

    #[test]
    fn summarizes_min_avg_max() {
        let log = log(vec![
            row("20250115090000", "11800", "2400"),
            row("20250115091500", "12100", "2400"),
            row("20250115093000", "11500", "2430"),
        ]);
        let report = DayReport::build(&log).unwrap().unwrap();
        assert_eq!(report.samples, 3);
        assert_eq!(report.first_timestamp, "20250115090000");
        assert_eq!(report.last_timestamp, "20250115093000");
        assert_eq!(report.throughput_down.min, 11500);
        assert_eq!(report.throughput_down.max, 12100);
        assert!((report.throughput_down.avg - 11800.0).abs() < f64::EPSILON);
        assert_eq!(report.throughput_up.min, 2400);
        assert_eq!(report.throughput_up.max, 2430);
    }

    #[test]
    fn single_sample_collapses_to_itself() {
        let log = log(vec![row("20250115120000", "9999", "1111")]);
        let report = DayReport::build(&log).unwrap().unwrap();
        assert_eq!(report.samples, 1);
        assert_eq!(report.first_timestamp, report.last_timestamp);
        assert_eq!(report.throughput_down.min, 9999);
        assert_eq!(report.throughput_down.max, 9999);
    }

    #[test]
    fn summary_handles_counters_at_the_integer_ceiling() {
        let max = u64::MAX.to_string();
        let log = log(vec![
            row("20250115090000", &max, "1"),
            row("20250115091500", &max, "3"),
        ]);
        let report = DayReport::build(&log).unwrap().unwrap();
        assert_eq!(report.throughput_down.min, u64::MAX);
        assert_eq!(report.throughput_down.max, u64::MAX);
        assert!((report.throughput_down.avg - u64::MAX as f64).abs() < f64::EPSILON);
        assert!((report.throughput_up.avg - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_day_yields_no_report() {
        assert!(DayReport::build(&log(vec![])).unwrap().is_none());
    }

    #[test]
    fn non_numeric_value_is_an_error() {
        let log = log(vec![row("20250115090000", "fast", "2400")]);
        let err = DayReport::build(&log).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"current_throughput_down value "fast" is not numeric"#
        );
    }

    #[test]
    fn parse_counter_trims_whitespace() {
        assert_eq!(parse_counter("current_throughput_down", " 42 ").unwrap(), 42);
    }
}
