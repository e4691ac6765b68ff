//! HTTP transport seam.
//!
//! The client hands a fully signed `http::Request<Bytes>` to an
//! [`HttpTransport`] and gets back the status and body. [`ReqwestTransport`]
//! is the production implementation; tests substitute their own.

use std::error::Error as _;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<http::Response<Bytes>, TransportError>> + Send + 'a>>;

/// Failures that happen before an HTTP response is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// DNS resolution or TCP/TLS connection failed.
    #[error("connection error: {0}")]
    Connect(String),

    /// Any other failure while sending or reading the response.
    #[error("request error: {0}")]
    Request(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

/// Sends one HTTP request.
pub trait HttpTransport: Send + Sync + 'static {
    /// Send `request` and collect the full response body.
    fn send(&self, request: http::Request<Bytes>) -> TransportFuture<'_>;
}

/// [`HttpTransport`] backed by a `reqwest::Client` with a fixed timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    ///
    /// Redirects are not followed: a 3xx from AWS is reported as-is.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("lightsail-cdn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Build(error_chain(&e)))?;

        Ok(Self { client, timeout })
    }

    /// The configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(error_chain(err))
        } else {
            TransportError::Request(error_chain(err))
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: http::Request<Bytes>) -> TransportFuture<'_> {
        Box::pin(async move {
            let (parts, body) = request.into_parts();

            let response = self
                .client
                .request(parts.method, parts.uri.to_string())
                .headers(parts.headers)
                .body(body)
                .send()
                .await
                .map_err(|e| self.classify(&e))?;

            let status = response.status();
            let body = response.bytes().await.map_err(|e| self.classify(&e))?;

            http::Response::builder()
                .status(status)
                .body(body)
                .map_err(|e| TransportError::Request(e.to_string()))
        })
    }
}

/// Render an error and its sources as `outer: inner: root`.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
