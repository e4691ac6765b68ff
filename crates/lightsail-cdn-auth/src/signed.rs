//! The immutable result of signing one request.

use std::fmt;

use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use http::{HeaderValue, Method, Request, Uri};

use crate::canonical::{CANONICAL_URI, CanonicalRequest, METHOD};
use crate::error::AuthError;

/// Header carrying the signing timestamp.
pub const X_AMZ_DATE: &str = "x-amz-date";

/// Header carrying the JSON-protocol operation name.
pub const X_AMZ_TARGET: &str = "x-amz-target";

/// Every value computed while signing one request, together with the payload
/// it was computed over.
///
/// A `SignedRequest` is never mutated after [`crate::sign_request`] returns it.
/// It is consumed by [`SignedRequest::into_http_request`], which moves the
/// exact hashed payload bytes into the outgoing request.
#[derive(Clone)]
pub struct SignedRequest {
    host: String,
    target: String,
    canonical: CanonicalRequest,
    credential_scope: String,
    string_to_sign: String,
    signature: String,
    authorization_header: String,
    payload: Bytes,
}

impl SignedRequest {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        host: String,
        target: String,
        canonical: CanonicalRequest,
        credential_scope: String,
        string_to_sign: String,
        signature: String,
        authorization_header: String,
        payload: Bytes,
    ) -> Self {
        Self {
            host,
            target,
            canonical,
            credential_scope,
            string_to_sign,
            signature,
            authorization_header,
            payload,
        }
    }

    /// Always `POST`.
    #[must_use]
    pub fn method(&self) -> &'static str {
        METHOD
    }

    /// Always `/`.
    #[must_use]
    pub fn path(&self) -> &'static str {
        CANONICAL_URI
    }

    /// The signed `host` header value.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The signed `x-amz-target` header value.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The canonical headers block.
    #[must_use]
    pub fn canonical_headers(&self) -> &str {
        self.canonical.canonical_headers()
    }

    /// The signed headers list.
    #[must_use]
    pub fn signed_headers(&self) -> &str {
        self.canonical.signed_headers()
    }

    /// Hex SHA-256 of the payload.
    #[must_use]
    pub fn payload_hash(&self) -> &str {
        self.canonical.payload_hash()
    }

    /// The full canonical request.
    #[must_use]
    pub fn canonical_request(&self) -> &str {
        self.canonical.as_str()
    }

    /// `X-Amz-Date` value.
    #[must_use]
    pub fn amz_date(&self) -> &str {
        self.canonical.amz_date()
    }

    /// Credential scope date.
    #[must_use]
    pub fn date_stamp(&self) -> &str {
        self.canonical.date_stamp()
    }

    /// `date/region/service/aws4_request`.
    #[must_use]
    pub fn credential_scope(&self) -> &str {
        &self.credential_scope
    }

    /// The string that was signed.
    #[must_use]
    pub fn string_to_sign(&self) -> &str {
        &self.string_to_sign
    }

    /// Hex signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Full `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self) -> &str {
        &self.authorization_header
    }

    /// The payload bytes that were hashed.
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Turn the signed values into an HTTP request to `uri`.
    ///
    /// The request carries `Host`, `Content-Type`, `X-Amz-Date`,
    /// `X-Amz-Target` and `Authorization`, and its body is the signed payload.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidUri`] if `uri` does not parse, or
    /// [`AuthError::InvalidHeaderValue`] if a signed value cannot be carried
    /// in an HTTP header.
    pub fn into_http_request(
        self,
        uri: &str,
        content_type: &str,
    ) -> Result<Request<Bytes>, AuthError> {
        let parsed: Uri = uri
            .parse()
            .map_err(|_| AuthError::InvalidUri(uri.to_owned()))?;

        Request::builder()
            .method(Method::POST)
            .uri(parsed)
            .header(HOST, header_value("host", &self.host)?)
            .header(CONTENT_TYPE, header_value("content-type", content_type)?)
            .header(X_AMZ_DATE, header_value(X_AMZ_DATE, self.canonical.amz_date())?)
            .header(X_AMZ_TARGET, header_value(X_AMZ_TARGET, &self.target)?)
            .header(
                AUTHORIZATION,
                header_value("authorization", &self.authorization_header)?,
            )
            .body(self.payload)
            .map_err(|e| AuthError::InvalidUri(e.to_string()))
    }
}

impl fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedRequest")
            .field("host", &self.host)
            .field("target", &self.target)
            .field("amz_date", &self.canonical.amz_date())
            .field("credential_scope", &self.credential_scope)
            .field("signed_headers", &self.canonical.signed_headers())
            .field("payload_hash", &self.canonical.payload_hash())
            .field("signature", &"...")
            .field("authorization_header", &"...")
            .finish_non_exhaustive()
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(value).map_err(|_| AuthError::InvalidHeaderValue(name))
}
