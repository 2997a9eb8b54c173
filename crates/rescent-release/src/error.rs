//! Error types for the release pipeline.

use thiserror::Error;

/// Errors that can occur while creating a release.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The version string does not have the form `major.minor.patch`.
    #[error("Invalid version format '{0}': expected 'x.y.z' with numeric parts")]
    InvalidVersion(String),

    /// Directory creation or file copy failed.
    #[error("Release I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for release operations.
pub type ReleaseResult<T> = Result<T, ReleaseError>;
