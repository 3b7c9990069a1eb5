//! Error types for cleanup runs.

use std::io;

use regsweep_registry::RegistryError;
use thiserror::Error;

/// Errors that abort a cleanup run.
///
/// Tag listing and per-tag deletion failures never surface here; they are
/// recorded in the [`CleanupReport`](crate::CleanupReport) instead.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// The repository catalog could not be fetched.
    #[error("Failed to fetch repository catalog: {source}")]
    Catalog {
        /// Underlying error.
        #[source]
        source: RegistryError,
    },

    /// Console output could not be written.
    #[error("Failed to write console output: {source}")]
    Output {
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl From<io::Error> for CleanupError {
    fn from(err: io::Error) -> Self {
        Self::Output { source: err }
    }
}
