//! Precondition checks and the secret-free configuration report.

use lightsail_cdn_auth::Credentials;
use serde::Serialize;

use crate::target::TargetConfig;

/// Whether `creds` and `target` carry everything needed to sign a request:
/// a non-empty access key, secret key and distribution name.
///
/// # Examples
///
/// ```
/// use lightsail_cdn_auth::Credentials;
/// use lightsail_cdn_client::{TargetConfig, validate};
/// use lightsail_cdn_core::AwsRegion;
///
/// let target = TargetConfig::lightsail(AwsRegion::default(), "dist");
/// assert!(validate(&Credentials::new("AKID", "secret"), &target));
/// assert!(!validate(&Credentials::new("AKID", ""), &target));
/// ```
#[must_use]
pub fn validate(creds: &Credentials, target: &TargetConfig) -> bool {
    creds.is_complete() && !target.distribution_name.is_empty()
}

/// Which configuration values are present, without revealing the keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialsStatus {
    /// An access key ID is set.
    pub access_key: bool,
    /// A secret access key is set.
    pub secret_key: bool,
    /// Configured region.
    pub region: String,
    /// Configured distribution name (may be empty).
    pub distribution_name: String,
    /// All required values are present.
    pub configured: bool,
}

impl CredentialsStatus {
    /// Report on `creds` and `target`.
    #[must_use]
    pub fn inspect(creds: &Credentials, target: &TargetConfig) -> Self {
        Self {
            access_key: creds.has_access_key(),
            secret_key: creds.has_secret_key(),
            region: target.region.to_string(),
            distribution_name: target.distribution_name.clone(),
            configured: validate(creds, target),
        }
    }
}
