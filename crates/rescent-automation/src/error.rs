//! Error types for the automation engine.

use thiserror::Error;

/// Errors that can occur in the automation engine.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// Settings storage read or write failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Interaction with the hosted page failed.
    #[error("Page error: {0}")]
    Page(String),

    /// The command channel was closed before a reply arrived.
    #[error("Command channel closed")]
    ChannelClosed,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for automation operations.
pub type AutomationResult<T> = Result<T, AutomationError>;
