//! Host-side error types.

use solstice_common::SolsticeError;
use thiserror::Error;

/// Errors raised by the host integration.
#[derive(Debug, Error)]
pub enum HostError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid slot name.
    #[error("Invalid slot name: {0}")]
    InvalidSlotName(String),

    /// Config serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Config parse error.
    #[error("TOML parse error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    /// Error from the seasonal cycle.
    #[error(transparent)]
    Solstice(#[from] SolsticeError),
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
