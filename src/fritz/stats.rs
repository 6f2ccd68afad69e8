//! The canonical DSL statistics record and the row table that defines it.
//!
//! Every value is kept as the raw text scraped from the status page.
//! Interpreting a value as a number happens in the report layer, nowhere
//! else, so oddities like `off`, `fast` or a German decimal comma survive
//! into the ledger unchanged.

/// One status-page row worth extracting.
///
/// `columns` is the number of captured value cells (`c2` onward) and
/// `fields` maps output field names to cell indices within those captures.
/// Cell 0 of a three-column row is usually the unit cell and stays unmapped.
#[derive(Debug, Clone)]
pub(crate) struct MetricSpec {
    pub(crate) label: &'static str,
    pub(crate) columns: usize,
    pub(crate) fields: &'static [(&'static str, usize)],
}

/// Number of fields in a [`DslStats`] record.
pub(crate) const FIELD_COUNT: usize = 34;

/// Row labels and field mappings, in ledger column order.
const BASE: &[MetricSpec] = &[
    MetricSpec {
        label: "Max. DSLAM throughput",
        columns: 3,
        fields: &[
            ("max_dslam_throughput_down", 1),
            ("max_dslam_throughput_up", 2),
        ],
    },
    MetricSpec {
        label: "Attainable throughput",
        columns: 3,
        fields: &[
            ("attainable_throughput_down", 1),
            ("attainable_throughput_up", 2),
        ],
    },
    MetricSpec {
        label: "Current throughput",
        columns: 3,
        fields: &[
            ("current_throughput_down", 1),
            ("current_throughput_up", 2),
        ],
    },
    MetricSpec {
        label: "Seamless rate adaptation",
        columns: 3,
        fields: &[
            ("seamless_rate_adaptation_down", 1),
            ("seamless_rate_adaptation_up", 2),
        ],
    },
    MetricSpec {
        label: "Latency",
        columns: 3,
        fields: &[("latency_down", 1), ("latency_up", 2)],
    },
    MetricSpec {
        label: "Impulse Noise Protection (INP)",
        columns: 3,
        fields: &[
            ("impulse_noise_protection_down", 1),
            ("impulse_noise_protection_up", 2),
        ],
    },
    MetricSpec {
        label: "G.INP",
        columns: 3,
        fields: &[("g_inp_down", 1), ("g_inp_up", 2)],
    },
    MetricSpec {
        label: "Signal-to-noise ratio",
        columns: 3,
        fields: &[
            ("signal_to_noise_ratio_down", 1),
            ("signal_to_noise_ratio_up", 2),
        ],
    },
    MetricSpec {
        label: "Bitswap",
        columns: 3,
        fields: &[("bitswap_down", 1), ("bitswap_up", 2)],
    },
    MetricSpec {
        label: "Line attenuation",
        columns: 3,
        fields: &[("line_attenuation_down", 1), ("line_attenuation_up", 2)],
    },
    MetricSpec {
        label: "approximate line length",
        columns: 3,
        fields: &[("approximate_line_length", 1)],
    },
    MetricSpec {
        label: "Profile",
        columns: 3,
        fields: &[("profile", 0)],
    },
    MetricSpec {
        label: "G.Vector",
        columns: 3,
        fields: &[("g_vector_down", 1), ("g_vector_up", 2)],
    },
    MetricSpec {
        label: "Carrier record",
        columns: 3,
        fields: &[("carrier_record_down", 1), ("carrier_record_up", 2)],
    },
    MetricSpec {
        label: "FRITZ!Box",
        columns: 4,
        fields: &[
            ("fritzbox_seconds_with_errors", 0),
            ("fritzbox_seconds_with_many_errors", 1),
            ("fritzbox_crc_errors_per_minute", 2),
            ("fritzbox_crc_errors_last_15_m", 3),
        ],
    },
    MetricSpec {
        label: "Central exchange",
        columns: 4,
        fields: &[
            ("central_exchange_seconds_with_errors", 0),
            ("central_exchange_seconds_with_many_errors", 1),
            ("central_exchange_crc_errors_per_minute", 2),
            ("central_exchange_crc_errors_last_15_m", 3),
        ],
    },
];

/// Field names in ledger column order. Identical for both error-row
/// arities, so every ledger file shares one schema.
pub(crate) fn field_names() -> impl Iterator<Item = &'static str> {
    BASE.iter()
        .flat_map(|spec| spec.fields.iter().map(|&(name, _)| name))
}

/// The row table used for one scrape.
///
/// `error_columns` is the captured-cell count of the two error-counter
/// rows. Older firmware renders three cells there, newer firmware four;
/// which one a device speaks is an operator setting, not something worth
/// probing for on every poll.
#[derive(Debug, Clone)]
pub(crate) struct MetricTable {
    specs: Vec<MetricSpec>,
}

impl MetricTable {
    pub(crate) fn new(error_columns: usize) -> Self {
        debug_assert!(error_columns == 3 || error_columns == 4);
        let specs = BASE
            .iter()
            .cloned()
            .map(|mut spec| {
                // The four-column rows are exactly the adjustable ones.
                if spec.columns == 4 {
                    spec.columns = error_columns;
                }
                spec
            })
            .collect();
        Self { specs }
    }

    pub(crate) fn specs(&self) -> &[MetricSpec] {
        &self.specs
    }
}

/// One polled record: raw text per field, in [`field_names`] order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DslStats {
    values: Vec<String>,
}

impl DslStats {
    pub(crate) fn from_values(values: Vec<String>) -> Self {
        debug_assert_eq!(values.len(), FIELD_COUNT);
        Self { values }
    }

    pub(crate) fn values(&self) -> &[String] {
        &self.values
    }

    /// Field lookup by name for spot checks in tests.
    #[cfg(test)]
    pub(crate) fn get(&self, field: &str) -> Option<&str> {
        field_names()
            .position(|name| name == field)
            .map(|i| self.values[i].as_str())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        field_names().zip(self.values.iter().map(String::as_str))
    }
}
