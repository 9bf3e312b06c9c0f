//! Error types for Solstice.

use thiserror::Error;

/// Top-level error type for Solstice operations.
#[derive(Debug, Error)]
pub enum SolsticeError {
    /// Persisted settings could not be used.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// An operation ran before its prerequisites.
    #[error("Precondition violated: {0}")]
    Precondition(#[from] PreconditionError),

    /// Settings could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while reading persisted cycle settings.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The blob is not a valid settings record.
    #[error("Malformed settings data: {0}")]
    Malformed(String),

    /// The cycle length is not one of the supported values.
    #[error("Unsupported cycle length: {0} (expected 60, 120, 180 or 360)")]
    UnsupportedCycleLength(u32),
}

/// Programmer errors in the lifecycle ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// Keyframes were applied or restored before the weather system was captured.
    #[error("weather system keyframes have not been captured; call init first")]
    NotInitialized,
}

/// Result type alias for Solstice operations.
pub type SolsticeResult<T> = Result<T, SolsticeError>;
