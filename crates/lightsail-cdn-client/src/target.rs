//! Which distribution to reset, and where to send the request.

use http::Uri;
use lightsail_cdn_auth::Credentials;
use lightsail_cdn_core::{AwsRegion, LightsailCdnConfig};

use crate::error::InvokeError;

/// Signing name of the Lightsail service.
pub const LIGHTSAIL_SERVICE: &str = "lightsail";

/// The distribution to act on and the service coordinates used to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    /// Region hosting the distribution.
    pub region: AwsRegion,
    /// Service signing name; `lightsail` for every call this crate makes.
    pub service: String,
    /// Lightsail distribution name.
    pub distribution_name: String,
    /// Endpoint override, e.g. `http://127.0.0.1:4566`. `None` means the
    /// regional AWS endpoint.
    pub endpoint: Option<String>,
}

impl TargetConfig {
    /// Target a Lightsail distribution at its regional AWS endpoint.
    pub fn lightsail(region: AwsRegion, distribution_name: impl Into<String>) -> Self {
        Self {
            region,
            service: LIGHTSAIL_SERVICE.to_owned(),
            distribution_name: distribution_name.into(),
            endpoint: None,
        }
    }

    /// Send requests to `endpoint` instead of the AWS endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Build the target from process configuration.
    #[must_use]
    pub fn from_config(config: &LightsailCdnConfig) -> Self {
        Self {
            region: config.region.clone(),
            service: LIGHTSAIL_SERVICE.to_owned(),
            distribution_name: config.distribution_name.clone(),
            endpoint: config.endpoint_url.clone(),
        }
    }

    /// Resolve the URL and signed `host` value for this target.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::InvalidRequest`] if the region cannot be placed
    /// in a hostname or the endpoint override is not an absolute URL.
    pub fn resolve_endpoint(&self) -> Result<Endpoint, InvokeError> {
        match &self.endpoint {
            Some(url) => Endpoint::from_url(url),
            None => {
                if !self.region.is_well_formed() {
                    return Err(InvokeError::InvalidRequest(format!(
                        "invalid region: {:?}",
                        self.region.as_str()
                    )));
                }
                let host = format!("{}.{}.amazonaws.com", self.service, self.region);
                Ok(Endpoint {
                    url: format!("https://{host}/"),
                    host,
                })
            }
        }
    }
}

/// Build [`Credentials`] from process configuration.
#[must_use]
pub fn credentials_from_config(config: &LightsailCdnConfig) -> Credentials {
    Credentials::new(
        config.access_key_id.clone(),
        config.secret_access_key.clone(),
    )
}

/// A resolved request destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Absolute URL with path `/`.
    pub url: String,
    /// Authority sent (and signed) as the `host` header.
    pub host: String,
}

impl Endpoint {
    /// Resolve an endpoint override. Any path on the override is replaced by `/`.
    fn from_url(url: &str) -> Result<Self, InvokeError> {
        let invalid = || InvokeError::InvalidRequest(format!("invalid endpoint URL: {url}"));

        let uri: Uri = url.parse().map_err(|_| invalid())?;
        let scheme = uri.scheme_str().ok_or_else(invalid)?;
        let authority = uri.authority().ok_or_else(invalid)?;

        Ok(Self {
            url: format!("{scheme}://{authority}/"),
            host: authority.to_string(),
        })
    }
}
