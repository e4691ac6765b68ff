//! Caller-facing outcome of one invocation.

use serde::Serialize;

use crate::error::InvokeError;

/// Message returned when the distribution cache was reset.
pub const SUCCESS_MESSAGE: &str = "Lightsail CDN cache cleared successfully";

/// Uniform success/failure value handed back to whatever triggered the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResult {
    /// Whether AWS accepted the request with status 200.
    pub success: bool,
    /// Confirmation on success; the error description otherwise.
    pub message: String,
}

impl InvocationResult {
    /// A successful result with the standard confirmation.
    #[must_use]
    pub fn succeeded() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_owned(),
        }
    }

    /// A failed result carrying `message`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl From<Result<(), InvokeError>> for InvocationResult {
    fn from(result: Result<(), InvokeError>) -> Self {
        match result {
            Ok(()) => Self::succeeded(),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}
