/// Standard date format used for display and reports: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date component of ledger file names: "20250115"
pub(crate) const FILE_DATE_FORMAT: &str = "%Y%m%d";

/// Compact record timestamp written to the ledger: "20250115093045"
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Factory defaults of the router's web interface
pub(crate) const DEFAULT_HOST: &str = "fritz.box";
pub(crate) const DEFAULT_USER: &str = "admin";

/// Request timeout when none is configured
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;
