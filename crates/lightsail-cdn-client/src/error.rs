//! Invocation errors.
//!
//! Every failure belongs to one of three kinds:
//!
//! - **Configuration**: detected before any network I/O; fixing the inputs is
//!   the only remedy.
//! - **Transport**: the request never produced an HTTP response (DNS, connect,
//!   timeout). A later attempt may succeed.
//! - **Provider**: AWS answered with a status other than 200.

use lightsail_cdn_auth::AuthError;

use crate::transport::TransportError;

/// Failure category of an [`InvokeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or unusable configuration.
    Configuration,
    /// Network-level failure.
    Transport,
    /// Non-200 response from AWS.
    Provider,
}

/// Errors returned by [`crate::LightsailClient::try_invoke`].
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// The access key, secret key or distribution name is empty.
    #[error("missing credentials")]
    MissingCredentials,

    /// The inputs cannot form a valid request (e.g. malformed region or endpoint).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP exchange failed before a response arrived.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// AWS returned a non-200 status. The body is kept verbatim.
    #[error("AWS API Error ({status}): {body}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
}

impl InvokeError {
    /// The failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials | Self::InvalidRequest(_) => ErrorKind::Configuration,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Provider { .. } => ErrorKind::Provider,
        }
    }

    /// Whether a later attempt could succeed without changing the inputs.
    ///
    /// The client itself never retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

impl From<AuthError> for InvokeError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingAccessKey | AuthError::MissingSecretKey => Self::MissingCredentials,
            other => Self::InvalidRequest(other.to_string()),
        }
    }
}
