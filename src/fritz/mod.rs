//! FRITZ!Box web interface client: session login and status page scraping.

pub(crate) mod auth;
pub(crate) mod client;
pub(crate) mod scrape;
pub(crate) mod stats;

pub(crate) use auth::{Sid, authenticate, logout};
pub(crate) use client::FritzClient;
pub(crate) use stats::{DslStats, MetricTable};

use crate::error::AppError;

const DSL_STATS_PATH: &str = "/internet/dsl_stats_tab.lua";

/// Fetch the DSL information page and parse it into the canonical record.
pub(crate) fn fetch_stats(
    client: &FritzClient,
    sid: &Sid,
    table: &MetricTable,
) -> Result<DslStats, AppError> {
    let body = client.get(DSL_STATS_PATH, &[("sid", sid.as_str())])?;
    Ok(scrape::parse_stats(&body, table)?)
}
