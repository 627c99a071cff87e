//! Boundary error type.
//!
//! The search core never fails: degenerate moves return unchanged routes,
//! unrepairable states evaluate to `+∞`. Errors exist only at the I/O
//! boundary (configuration, CSV ingestion, report emission).

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced at the crate's I/O boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A required or malformed configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The node CSV could not be opened or read.
    #[error("failed to read nodes from {}: {source}", .path.display())]
    Csv {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Filesystem failure while writing reports.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization failure while writing JSON traces.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
