use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Scrape(#[from] ScrapeError),

    #[error("{0}")]
    Persistence(#[from] PersistenceError),

    #[error("{0}")]
    Value(#[from] ValueError),

    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("No password given (use --password or set one in the config file)")]
    MissingPassword,

    #[error("error_columns must be 3 or 4 (got {0})")]
    InvalidErrorColumns(u8),
}

#[derive(Debug, Error)]
pub(crate) enum AuthError {
    #[error("access denied")]
    AccessDenied,

    #[error("login response is not valid XML: {0}")]
    InvalidXml(#[from] roxmltree::Error),

    #[error("login response has no <{element}> element")]
    MalformedLogin { element: &'static str },

    #[error("router returned a malformed session id \"{value}\"")]
    InvalidSid { value: String },
}

/// Failures of the HTTP round trip itself. Only the request path is
/// recorded; query strings carry session and credential material.
#[derive(Debug, Error)]
pub(crate) enum TransportError {
    #[error("GET {path} failed: {source}")]
    Request { path: String, source: ureq::Error },

    #[error("reading the response for {path} failed: {source}")]
    Body { path: String, source: ureq::Error },
}

#[derive(Debug, Error)]
pub(crate) enum ScrapeError {
    #[error("status page has no \"{label}\" row")]
    RowMissing { label: &'static str },

    #[error("status page has multiple \"{label}\" rows")]
    AmbiguousRow { label: &'static str },

    #[error("status page \"{label}\" row has markup inside a value cell")]
    CellMarkup { label: &'static str },
}

#[derive(Debug, Error)]
pub(crate) enum PersistenceError {
    #[error(
        "{}: header does not match the current field order (found {found} columns, expected {expected})",
        .path.display()
    )]
    HeaderMismatch {
        path: PathBuf,
        found: usize,
        expected: usize,
    },

    #[error(
        "{}:{line}: row has {found} columns, expected {expected}",
        .path.display()
    )]
    MalformedRow {
        path: PathBuf,
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub(crate) enum ValueError {
    #[error("{field} value \"{value}\" is not numeric")]
    NotNumeric { field: &'static str, value: String },
}
