//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Poll the router once and print the current line statistics (default)
    Show,
    /// Poll the router once and append the record to the ledger
    Poll,
    /// Summarize one day's ledger file
    Report {
        /// Day to summarize (YYYYMMDD or YYYY-MM-DD, default today)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
    },
}
