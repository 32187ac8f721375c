//! Failure taxonomy for a report run.

use std::path::PathBuf;

use thiserror::Error;

use crate::meshtastic::QueryError;
use crate::peers::ParseError;

/// Every way a report invocation can stop. All variants except
/// [`ReportError::SinkWriteFailure`] end the run before anything is printed.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The Meshtastic CLI could not be run, timed out, or exited non-zero.
    #[error("device {target} unreachable: {source}")]
    TargetUnreachable {
        target: String,
        #[source]
        source: QueryError,
    },

    /// The CLI output has no node table marker.
    #[error("no '{marker}' section found in the device output")]
    SectionNotFound { marker: String },

    /// No balanced `{}` block follows the marker.
    #[error("failed to extract a balanced JSON block from the node table (text starts: {context})")]
    ExtractionFailed { context: String },

    /// The block is not JSON or not an object of peer objects.
    #[error("malformed peer table: {0}")]
    MalformedPeerTable(#[from] ParseError),

    /// The `--age` value does not match `<digits><s|m|h|d>`.
    #[error("invalid age format: {spec}. Expected format like '1s', '5m', '2h', '1d'")]
    InvalidAgeSpec { spec: String },

    /// The JSON export could not be written. Non-fatal for the run.
    #[error("error writing JSON report to {}: {source}", .path.display())]
    SinkWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Whether the run should still exit successfully after reporting this.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ReportError::SinkWriteFailure { .. })
    }
}
