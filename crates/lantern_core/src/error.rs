//! Host error types

use thiserror::Error;

/// Errors raised by host capabilities (browser or in-memory)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A capability the component depends on is not provided by the host
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    /// A required element could not be located in the document
    #[error("Element not found: {0}")]
    MissingElement(String),

    /// Persisted preference storage rejected a read or write
    #[error("Storage failed: {0}")]
    Storage(String),

    /// Registering an event listener or observer failed
    #[error("Listener registration failed: {0}")]
    Listener(String),

    /// Generic host error
    #[error("Host error: {0}")]
    Other(String),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
