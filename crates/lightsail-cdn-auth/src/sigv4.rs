//! AWS Signature Version 4 signing.
//!
//! The signing flow for one request:
//!
//! 1. Build the canonical request from the host, target and payload.
//! 2. Build the string to sign from the timestamp, credential scope and the
//!    canonical request hash.
//! 3. Derive the signing key with a four-stage HMAC-SHA256 chain over the
//!    secret key and the credential scope components.
//! 4. Sign the string to sign and assemble the `Authorization` header.
//!
//! The main entry point is [`sign_request`].

use bytes::Bytes;
use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::CanonicalRequest;
use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::signed::SignedRequest;

/// The only algorithm supported by this implementation.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Terminator of every credential scope.
const SCOPE_TERMINATOR: &str = "aws4_request";

type HmacSha256 = Hmac<Sha256>;

/// Everything besides the request itself that a signature binds to.
#[derive(Debug, Clone, Copy)]
pub struct SigningParams<'a> {
    /// Credentials to sign with.
    pub credentials: &'a Credentials,
    /// AWS region, e.g. `us-east-1`.
    pub region: &'a str,
    /// Signing name of the service, e.g. `lightsail`.
    pub service: &'a str,
    /// The instant the request is signed at.
    pub time: DateTime<Utc>,
}

impl<'a> SigningParams<'a> {
    /// Bundle signing parameters.
    #[must_use]
    pub fn new(
        credentials: &'a Credentials,
        region: &'a str,
        service: &'a str,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            credentials,
            region,
            service,
            time,
        }
    }
}

/// Sign a JSON-protocol `POST /` request.
///
/// The returned [`SignedRequest`] owns `payload`; the bytes that were hashed
/// are the bytes that will be sent.
///
/// # Errors
///
/// Returns [`AuthError::MissingAccessKey`] or [`AuthError::MissingSecretKey`]
/// if either half of the credentials is empty.
pub fn sign_request(
    params: &SigningParams<'_>,
    host: &str,
    target: &str,
    payload: Bytes,
) -> Result<SignedRequest, AuthError> {
    if !params.credentials.has_access_key() {
        return Err(AuthError::MissingAccessKey);
    }
    if !params.credentials.has_secret_key() {
        return Err(AuthError::MissingSecretKey);
    }

    let canonical = CanonicalRequest::build(host, target, &payload, params.time);
    debug!(canonical_request = canonical.as_str(), "Built canonical request");

    let credential_scope =
        build_credential_scope(canonical.date_stamp(), params.region, params.service);
    let string_to_sign =
        build_string_to_sign(canonical.amz_date(), &credential_scope, &canonical.hash());
    debug!(string_to_sign, "Built string to sign");

    let signing_key = derive_signing_key(
        params.credentials.secret_key(),
        canonical.date_stamp(),
        params.region,
        params.service,
    );
    let signature = compute_signature(&signing_key, &string_to_sign);

    let authorization_header = build_authorization_header(
        params.credentials.access_key(),
        &credential_scope,
        canonical.signed_headers(),
        &signature,
    );

    debug!(
        access_key_id = params.credentials.access_key(),
        credential_scope, "Signed request"
    );

    Ok(SignedRequest::new(
        host.to_owned(),
        target.to_owned(),
        canonical,
        credential_scope,
        string_to_sign,
        signature,
        authorization_header,
        payload,
    ))
}

/// Build the credential scope `date/region/service/aws4_request`.
///
/// # Examples
///
/// ```
/// use lightsail_cdn_auth::sigv4::build_credential_scope;
///
/// assert_eq!(
///     build_credential_scope("20240115", "us-east-1", "lightsail"),
///     "20240115/us-east-1/lightsail/aws4_request"
/// );
/// ```
#[must_use]
pub fn build_credential_scope(date_stamp: &str, region: &str, service: &str) -> String {
    format!("{date_stamp}/{region}/{service}/{SCOPE_TERMINATOR}")
}

/// Build the SigV4 string to sign.
///
/// Format:
/// ```text
/// AWS4-HMAC-SHA256\n
/// <ISO8601 timestamp>\n
/// <credential_scope>\n
/// <hex(SHA256(canonical_request))>
/// ```
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Derive the SigV4 signing key using HMAC-SHA256 chain.
///
/// ```text
/// DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, service)
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
/// ```
///
/// Each stage is keyed with the raw 32-byte digest of the previous stage.
///
/// # Examples
///
/// ```
/// use lightsail_cdn_auth::sigv4::derive_signing_key;
///
/// let key = derive_signing_key(
///     "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
///     "20150830",
///     "us-east-1",
///     "iam",
/// );
/// assert_eq!(
///     hex::encode(key),
///     "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9"
/// );
/// ```
#[must_use]
pub fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let date_region_key = hmac_sha256(&date_key, region.as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, service.as_bytes());
    hmac_sha256(&date_region_service_key, SCOPE_TERMINATOR.as_bytes())
}

/// Compute the HMAC-SHA256 signature of `data` using the given `signing_key`.
///
/// Returns the hex-encoded signature.
#[must_use]
pub fn compute_signature(signing_key: &[u8], data: &str) -> String {
    hex::encode(hmac_sha256(signing_key, data.as_bytes()))
}

/// Assemble the `Authorization` header value.
#[must_use]
pub fn build_authorization_header(
    access_key_id: &str,
    credential_scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "{ALGORITHM} Credential={access_key_id}/{credential_scope}, \
         SignedHeaders={signed_headers}, Signature={signature}"
    )
}

/// Compare two hex signatures in constant time.
#[must_use]
pub fn signatures_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
