//! Ledger appends: one CSV line per poll, one file per calendar day.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use fs2::FileExt;

use crate::consts::TIMESTAMP_FORMAT;
use crate::error::PersistenceError;
use crate::fritz::stats::{DslStats, FIELD_COUNT};

use super::{csv_escape, day_file_name, expected_header};

/// Append one record to the day file for `now`, creating the file and its
/// header when absent. The exclusive lock spans the header check and the
/// write, so overlapping scheduled runs serialize instead of interleaving.
/// On a header mismatch the file is left untouched.
pub(crate) fn append(
    dir: &Path,
    stats: &DslStats,
    now: DateTime<Local>,
) -> Result<PathBuf, PersistenceError> {
    let path = dir.join(day_file_name(now.date_naive()));
    let io_err = |source| PersistenceError::Io {
        path: path.clone(),
        source,
    };

    let file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(&path)
        .map_err(io_err)?;
    file.lock_exclusive().map_err(io_err)?;

    let header = expected_header();
    let mut first_line = String::new();
    BufReader::new(&file)
        .read_line(&mut first_line)
        .map_err(io_err)?;
    let found_header = first_line.trim_end_matches(['\r', '\n']);

    let mut out = String::new();
    if first_line.is_empty() {
        out.push_str(&header);
        out.push('\n');
    } else if found_header != header {
        return Err(PersistenceError::HeaderMismatch {
            path: path.clone(),
            found: found_header.split(',').count(),
            expected: FIELD_COUNT + 1,
        });
    }
    out.push_str(&record_line(stats, now));
    out.push('\n');

    // O_APPEND writes go to the end regardless of the read position above.
    (&file).write_all(out.as_bytes()).map_err(io_err)?;
    Ok(path)
}

fn record_line(stats: &DslStats, now: DateTime<Local>) -> String {
    let mut line = now.format(TIMESTAMP_FORMAT).to_string();
    for value in stats.values() {
        line.push(',');
        line.push_str(&csv_escape(value));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use std::thread;
    use std::time::Duration;

    fn sample_stats() -> DslStats {
        DslStats::from_values((0..FIELD_COUNT).map(|i| format!("v{i}")).collect())
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 15, h, m, s).unwrap()
    }

    #[test]
    fn creates_file_with_header_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = append(dir.path(), &sample_stats(), at(9, 30, 45)).unwrap();
        assert_eq!(path.file_name().unwrap(), "20250115.csv");

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], expected_header());
        assert!(lines[1].starts_with("20250115093045,v0,v1,"));
        assert!(lines[1].ends_with(",v33"));
    }

    #[test]
    fn appends_in_order_without_repeating_the_header() {
        let dir = tempfile::tempdir().unwrap();
        append(dir.path(), &sample_stats(), at(9, 0, 0)).unwrap();
        let path = append(dir.path(), &sample_stats(), at(9, 15, 0)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("20250115090000,"));
        assert!(lines[2].starts_with("20250115091500,"));
    }

    #[test]
    fn concurrent_appends_wait_for_the_file_lock() {
        let dir = tempfile::tempdir().unwrap();
        append(dir.path(), &sample_stats(), at(9, 0, 0)).unwrap();
        let path = dir.path().join("20250115.csv");

        let holder = OpenOptions::new().read(true).open(&path).unwrap();
        holder.lock_exclusive().unwrap();

        let worker_dir = dir.path().to_path_buf();
        let worker = thread::spawn(move || append(&worker_dir, &sample_stats(), at(9, 15, 0)));
        thread::sleep(Duration::from_millis(400));
        assert!(
            !worker.is_finished(),
            "append must block while another handle holds the lock"
        );

        holder.unlock().unwrap();
        worker.join().expect("join append").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], expected_header());
        assert!(lines[1].starts_with("20250115090000,"));
        assert!(lines[2].starts_with("20250115091500,"));
    }

    #[test]
    fn values_with_commas_are_quoted() {
        let mut values: Vec<String> = (0..FIELD_COUNT).map(|i| format!("v{i}")).collect();
        values[4] = "1,5".to_string();
        let stats = DslStats::from_values(values);

        let dir = tempfile::tempdir().unwrap();
        let path = append(dir.path(), &stats, at(12, 0, 0)).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(",\"1,5\","));
        // Still one timestamp column plus 34 value columns once unquoted.
        assert_eq!(content.lines().nth(1).unwrap().matches("v").count(), 33);
    }

    #[test]
    fn foreign_header_rejects_the_append_and_leaves_the_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("20250115.csv");
        let original = "timestamp,foo,bar\n20250115080000,1,2\n";
        fs::write(&path, original).unwrap();

        let err = append(dir.path(), &sample_stats(), at(9, 0, 0)).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::HeaderMismatch {
                found: 3,
                expected: 35,
                ..
            }
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn day_rollover_starts_a_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let before = Local.with_ymd_and_hms(2025, 1, 15, 23, 59, 45).unwrap();
        let after = Local.with_ymd_and_hms(2025, 1, 16, 0, 0, 15).unwrap();
        let first = append(dir.path(), &sample_stats(), before).unwrap();
        let second = append(dir.path(), &sample_stats(), after).unwrap();

        assert_ne!(first, second);
        assert_eq!(second.file_name().unwrap(), "20250116.csv");
        let content = fs::read_to_string(&second).unwrap();
        assert_eq!(content.lines().next().unwrap(), expected_header());
    }
}
