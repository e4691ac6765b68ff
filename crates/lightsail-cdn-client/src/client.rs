//! The signer/invoker.
//!
//! One invocation is a straight line: validate, resolve the endpoint, build
//! the JSON body, sign, send, interpret. Nothing is retried and nothing is
//! cached between calls.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::StatusCode;
use lightsail_cdn_auth::{Credentials, SigningParams, sign_request};
use lightsail_cdn_core::{AwsRegion, LightsailCdnConfig};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::InvokeError;
use crate::operation::{AwsJsonRequest, CONTENT_TYPE};
use crate::result::InvocationResult;
use crate::status::validate;
use crate::target::{Endpoint, TargetConfig};
use crate::transport::{HttpTransport, ReqwestTransport, TransportError};

/// Signs and sends Lightsail requests.
///
/// Cloning is cheap and clones share the transport. Concurrent invocations
/// need no coordination: every call derives all of its values from its own
/// arguments and a single clock reading.
#[derive(Clone)]
pub struct LightsailClient {
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for LightsailClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightsailClient")
            .field("transport", &"...")
            .field("clock", &"...")
            .finish()
    }
}

impl LightsailClient {
    /// Create a client using `reqwest` with the given timeout and the system clock.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(
            timeout,
        )?)))
    }

    /// Create a client using the timeout from process configuration.
    pub fn from_config(config: &LightsailCdnConfig) -> Result<Self, TransportError> {
        Self::new(config.timeout())
    }

    /// Create a client over an arbitrary transport, using the system clock.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for signing timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Reset the distribution cache and report the outcome.
    ///
    /// Never fails: every error is folded into an unsuccessful
    /// [`InvocationResult`].
    pub async fn invoke(&self, creds: &Credentials, target: &TargetConfig) -> InvocationResult {
        let result = self.try_invoke(creds, target).await;

        match &result {
            Ok(()) => info!(
                distribution = %target.distribution_name,
                region = %target.region,
                "Lightsail distribution cache reset"
            ),
            Err(err) => warn!(
                distribution = %target.distribution_name,
                region = %target.region,
                kind = ?err.kind(),
                error = %err,
                "Lightsail distribution cache reset failed"
            ),
        }

        InvocationResult::from(result)
    }

    /// Reset the distribution cache.
    ///
    /// Returns [`InvokeError::MissingCredentials`] without touching the
    /// network when [`validate`] rejects the inputs.
    pub async fn try_invoke(
        &self,
        creds: &Credentials,
        target: &TargetConfig,
    ) -> Result<(), InvokeError> {
        if !validate(creds, target) {
            return Err(InvokeError::MissingCredentials);
        }

        let endpoint = target.resolve_endpoint()?;
        let request = AwsJsonRequest {
            service: target.service.clone(),
            ..AwsJsonRequest::reset_distribution_cache(&target.distribution_name)?
        };

        self.try_send(creds, &target.region, &endpoint, request)
            .await
            .map(|_| ())
    }

    /// Sign and send one JSON-protocol request, returning the body of a 200
    /// response.
    ///
    /// # Errors
    ///
    /// - [`InvokeError::MissingCredentials`] if either key is empty.
    /// - [`InvokeError::InvalidRequest`] if a signed value cannot be sent.
    /// - [`InvokeError::Transport`] if no response arrives.
    /// - [`InvokeError::Provider`] for any status other than 200.
    pub async fn try_send(
        &self,
        creds: &Credentials,
        region: &AwsRegion,
        endpoint: &Endpoint,
        request: AwsJsonRequest,
    ) -> Result<Bytes, InvokeError> {
        let params = SigningParams::new(creds, region.as_str(), &request.service, self.clock.now());
        let signed = sign_request(&params, &endpoint.host, &request.target, request.payload)?;

        debug!(
            url = %endpoint.url,
            x_amz_target = signed.target(),
            amz_date = signed.amz_date(),
            payload_hash = signed.payload_hash(),
            "Sending signed request"
        );

        let http_request = signed.into_http_request(&endpoint.url, CONTENT_TYPE)?;
        let response = self.transport.send(http_request).await?;

        let status = response.status();
        let body = response.into_body();

        if status == StatusCode::OK {
            debug!(status = status.as_u16(), body_len = body.len(), "Request accepted");
            Ok(body)
        } else {
            Err(InvokeError::Provider {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }
}
