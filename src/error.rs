//! Generation error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the node list or emitting an output document.
///
/// Every variant is terminal for the run: nothing is retried, and outputs
/// already written before the failure stay on disk.
#[derive(Debug, Error)]
pub enum ConfgenError {
    /// The configuration file does not exist.
    #[error("config file not found: {path}")]
    ConfigMissing {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML, or has the wrong shape.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A generated document could not be written to its destination.
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
