//! Error types for the Lightsail CDN core.

/// Core error type for configuration and shared types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Name of the variable.
        key: String,
        /// The rejected value.
        value: String,
    },
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
