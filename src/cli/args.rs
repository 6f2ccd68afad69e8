//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::Config;
use crate::consts::{DEFAULT_HOST, DEFAULT_TIMEOUT_SECS, DEFAULT_USER};
use crate::error::AppError;

use super::commands::Commands;

#[derive(Debug, Parser)]
#[command(name = "dslmon")]
#[command(about = "FRITZ!Box DSL line quality monitor", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Router host name or base URL
    #[arg(short = 'H', long, global = true)]
    pub(crate) host: Option<String>,

    /// Web interface user name
    #[arg(short, long, global = true)]
    pub(crate) user: Option<String>,

    /// Web interface password
    #[arg(short, long, global = true)]
    pub(crate) password: Option<String>,

    /// Ledger directory
    #[arg(short, long, global = true)]
    pub(crate) dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,

    /// Captured cells of the error-counter rows (firmware dependent)
    #[arg(long, global = true, value_name = "N")]
    pub(crate) error_columns: Option<u8>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Enable debug output (request timing, config loading)
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

/// Final connection and ledger settings after the config merge.
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) host: String,
    pub(crate) user: String,
    pub(crate) password: Option<String>,
    pub(crate) dir: PathBuf,
    pub(crate) timeout: Duration,
    pub(crate) error_columns: usize,
}

impl Settings {
    /// `report` runs without credentials; everything that opens a session
    /// calls this first.
    pub(crate) fn require_password(&self) -> Result<&str, AppError> {
        self.password.as_deref().ok_or(AppError::MissingPassword)
    }
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if self.host.is_none() {
            self.host = config.host.clone();
        }
        if self.user.is_none() {
            self.user = config.user.clone();
        }
        if self.password.is_none() {
            self.password = config.password.clone();
        }
        if self.dir.is_none() {
            self.dir = config.dir.clone();
        }
        if self.timeout.is_none() {
            self.timeout = config.timeout_secs;
        }
        if self.error_columns.is_none() {
            self.error_columns = config.error_columns;
        }
        // For boolean flags, config only applies if CLI is false (default)
        if !self.debug && config.debug {
            self.debug = true;
        }
        self
    }

    pub(crate) fn settings(&self) -> Result<Settings, AppError> {
        let error_columns = match self.error_columns {
            None => 4,
            Some(n @ (3 | 4)) => usize::from(n),
            Some(other) => return Err(AppError::InvalidErrorColumns(other)),
        };
        Ok(Settings {
            host: self
                .host
                .clone()
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            user: self
                .user
                .clone()
                .unwrap_or_else(|| DEFAULT_USER.to_string()),
            password: self.password.clone(),
            dir: self.dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            timeout: Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            error_columns,
        })
    }
}
