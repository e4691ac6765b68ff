//! Error types for SigV4 signing.

/// Errors that can occur while signing a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The access key ID is empty.
    #[error("Missing access key ID")]
    MissingAccessKey,

    /// The secret access key is empty.
    #[error("Missing secret access key")]
    MissingSecretKey,

    /// A header value cannot be carried by HTTP (e.g. contains control characters).
    #[error("Invalid value for header {0}")]
    InvalidHeaderValue(&'static str),

    /// The request URI could not be parsed.
    #[error("Invalid request URI: {0}")]
    InvalidUri(String),
}
