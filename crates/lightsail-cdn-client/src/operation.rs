//! AWS JSON-protocol request descriptions.
//!
//! Lightsail speaks `awsJson1_1`: every call is `POST /` with the operation in
//! the `X-Amz-Target` header:
//!
//! ```text
//! X-Amz-Target: Lightsail_20161128.ResetDistributionCache
//! ```

use bytes::Bytes;
use serde::Serialize;

use crate::error::InvokeError;
use crate::target::LIGHTSAIL_SERVICE;

/// Content type for `awsJson1_1` request bodies.
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// `X-Amz-Target` prefix for the Lightsail API version.
pub const LIGHTSAIL_TARGET_PREFIX: &str = "Lightsail_20161128";

/// Operation name of the cache reset call.
pub const RESET_DISTRIBUTION_CACHE: &str = "ResetDistributionCache";

/// One JSON-protocol call: who signs it, which operation, and the exact body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsJsonRequest {
    /// Service signing name.
    pub service: String,
    /// Full `X-Amz-Target` value, `<prefix>.<operation>`.
    pub target: String,
    /// Serialized JSON body. These bytes are both hashed and sent.
    pub payload: Bytes,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetDistributionCacheInput<'a> {
    distribution_name: &'a str,
}

impl AwsJsonRequest {
    /// Build a request from any serializable input.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::InvalidRequest`] if `input` fails to serialize.
    pub fn new<T: Serialize>(
        service: impl Into<String>,
        target_prefix: &str,
        operation: &str,
        input: &T,
    ) -> Result<Self, InvokeError> {
        let payload = serde_json::to_vec(input)
            .map_err(|e| InvokeError::InvalidRequest(format!("cannot serialize {operation}: {e}")))?;

        Ok(Self {
            service: service.into(),
            target: format!("{target_prefix}.{operation}"),
            payload: Bytes::from(payload),
        })
    }

    /// `Lightsail_20161128.ResetDistributionCache` for `distribution_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightsail_cdn_client::AwsJsonRequest;
    ///
    /// let request = AwsJsonRequest::reset_distribution_cache("test").unwrap();
    /// assert_eq!(request.target, "Lightsail_20161128.ResetDistributionCache");
    /// assert_eq!(&request.payload[..], br#"{"distributionName":"test"}"#);
    /// ```
    pub fn reset_distribution_cache(distribution_name: &str) -> Result<Self, InvokeError> {
        Self::new(
            LIGHTSAIL_SERVICE,
            LIGHTSAIL_TARGET_PREFIX,
            RESET_DISTRIBUTION_CACHE,
            &ResetDistributionCacheInput { distribution_name },
        )
    }
}
