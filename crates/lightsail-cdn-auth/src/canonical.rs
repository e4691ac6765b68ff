//! Canonical request construction for AWS Signature Version 4.
//!
//! The canonical request has the layout:
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders (each line newline-terminated)\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! AWS JSON-protocol calls always use `POST /` with an empty query string and
//! sign exactly three headers, in this order: `host`, `x-amz-date`,
//! `x-amz-target`. Header values are used verbatim.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// HTTP method of every JSON-protocol call.
pub const METHOD: &str = "POST";

/// Canonical URI of every JSON-protocol call.
pub const CANONICAL_URI: &str = "/";

/// `strftime` layout of the `X-Amz-Date` timestamp.
const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// `strftime` layout of the credential scope date.
const DATE_STAMP_FORMAT: &str = "%Y%m%d";

/// The canonical form of one JSON-protocol request, plus the values derived
/// alongside it that the signer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    canonical_request: String,
    canonical_headers: String,
    signed_headers: String,
    payload_hash: String,
    amz_date: String,
    date_stamp: String,
}

impl CanonicalRequest {
    /// Build the canonical request for `POST /` to `host`.
    ///
    /// `time` is the single clock reading for the whole signing pass; both the
    /// `X-Amz-Date` header and the credential scope date are derived from it.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use lightsail_cdn_auth::CanonicalRequest;
    ///
    /// let time = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    /// let canonical = CanonicalRequest::build(
    ///     "lightsail.us-east-1.amazonaws.com",
    ///     "Lightsail_20161128.ResetDistributionCache",
    ///     br#"{"distributionName":"test"}"#,
    ///     time,
    /// );
    /// assert_eq!(canonical.amz_date(), "20240115T103000Z");
    /// assert_eq!(canonical.signed_headers(), "host;x-amz-date;x-amz-target");
    /// ```
    #[must_use]
    pub fn build(host: &str, target: &str, payload: &[u8], time: DateTime<Utc>) -> Self {
        let amz_date = format_amz_date(time);
        let date_stamp = format_date_stamp(time);
        let payload_hash = hash_payload(payload);

        let headers = [
            ("host", host),
            ("x-amz-date", amz_date.as_str()),
            ("x-amz-target", target),
        ];
        let canonical_headers = build_canonical_headers(&headers);
        let signed_headers = build_signed_headers_string(&headers);

        let canonical_request = assemble_canonical_request(
            METHOD,
            CANONICAL_URI,
            "",
            &canonical_headers,
            &signed_headers,
            &payload_hash,
        );

        Self {
            canonical_request,
            canonical_headers,
            signed_headers,
            payload_hash,
            amz_date,
            date_stamp,
        }
    }

    /// The full canonical request string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical_request
    }

    /// The canonical headers block, each line newline-terminated.
    #[must_use]
    pub fn canonical_headers(&self) -> &str {
        &self.canonical_headers
    }

    /// The `;`-separated list of signed header names.
    #[must_use]
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// Hex SHA-256 of the payload bytes.
    #[must_use]
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }

    /// `YYYYMMDDThhmmssZ` timestamp.
    #[must_use]
    pub fn amz_date(&self) -> &str {
        &self.amz_date
    }

    /// `YYYYMMDD` date used in the credential scope.
    #[must_use]
    pub fn date_stamp(&self) -> &str {
        &self.date_stamp
    }

    /// Hex SHA-256 of the canonical request, as embedded in the string to sign.
    #[must_use]
    pub fn hash(&self) -> String {
        hash_payload(self.canonical_request.as_bytes())
    }
}

/// Format a UTC instant as an `X-Amz-Date` value (`YYYYMMDDThhmmssZ`).
#[must_use]
pub fn format_amz_date(time: DateTime<Utc>) -> String {
    time.format(AMZ_DATE_FORMAT).to_string()
}

/// Format a UTC instant as a credential scope date (`YYYYMMDD`).
#[must_use]
pub fn format_date_stamp(time: DateTime<Utc>) -> String {
    time.format(DATE_STAMP_FORMAT).to_string()
}

/// Build the canonical headers block.
///
/// Headers are emitted in the order given, names lower-cased, values verbatim,
/// each line terminated by `\n`.
///
/// # Examples
///
/// ```
/// use lightsail_cdn_auth::canonical::build_canonical_headers;
///
/// let block = build_canonical_headers(&[("Host", "example.com"), ("X-Amz-Date", "20150830T123600Z")]);
/// assert_eq!(block, "host:example.com\nx-amz-date:20150830T123600Z\n");
/// ```
#[must_use]
pub fn build_canonical_headers(headers: &[(&str, &str)]) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}:{value}\n", name.to_ascii_lowercase()))
        .collect()
}

/// Build the signed headers list from the same header slice used for the
/// canonical headers block, so the two always agree.
///
/// # Examples
///
/// ```
/// use lightsail_cdn_auth::canonical::build_signed_headers_string;
///
/// assert_eq!(
///     build_signed_headers_string(&[("host", "a"), ("X-Amz-Date", "b")]),
///     "host;x-amz-date"
/// );
/// ```
#[must_use]
pub fn build_signed_headers_string(headers: &[(&str, &str)]) -> String {
    headers
        .iter()
        .map(|(name, _)| name.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(";")
}

/// Join the canonical request components.
///
/// `canonical_headers` must already carry its trailing newline, which yields
/// the blank line between the headers block and the signed headers list.
#[must_use]
pub fn assemble_canonical_request(
    method: &str,
    uri: &str,
    query_string: &str,
    canonical_headers: &str,
    signed_headers: &str,
    payload_hash: &str,
) -> String {
    format!("{method}\n{uri}\n{query_string}\n{canonical_headers}\n{signed_headers}\n{payload_hash}")
}

/// Compute the SHA-256 hash of the given payload and return it as a hex string.
///
/// # Examples
///
/// ```
/// use lightsail_cdn_auth::hash_payload;
///
/// // SHA-256 of empty payload
/// assert_eq!(
///     hash_payload(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}
