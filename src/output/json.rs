use serde_json::{Map, Value};

use crate::consts::DATE_FORMAT;
use crate::fritz::DslStats;
use crate::report::{CounterSummary, DayReport};

/// Render one polled record as a JSON object, keys in ledger order.
pub(crate) fn stats_json(stats: &DslStats) -> String {
    let mut map = Map::new();
    for (name, value) in stats.iter() {
        map.insert(name.to_string(), Value::String(value.to_string()));
    }
    serde_json::to_string_pretty(&Value::Object(map)).unwrap()
}

fn summary_json(summary: &CounterSummary) -> Value {
    serde_json::json!({
        "min": summary.min,
        "avg": summary.avg,
        "max": summary.max,
    })
}

pub(crate) fn report_json(report: &DayReport) -> String {
    let output = serde_json::json!({
        "date": report.date.format(DATE_FORMAT).to_string(),
        "samples": report.samples,
        "first_timestamp": report.first_timestamp,
        "last_timestamp": report.last_timestamp,
        "current_throughput_down": summary_json(&report.throughput_down),
        "current_throughput_up": summary_json(&report.throughput_up),
    });
    serde_json::to_string_pretty(&output).unwrap()
}
