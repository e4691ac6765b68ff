//! Configuration for the Lightsail CDN invoker.
//!
//! All configuration is driven by environment variables, using the standard
//! AWS variable names for credentials and region.

use std::fmt;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::types::AwsRegion;

/// Timeout applied to the single HTTP attempt unless overridden.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Process-level configuration consumed by the invoker.
///
/// The secret access key is redacted from the `Debug` output and the type is
/// deliberately not serializable.
#[derive(Clone)]
pub struct LightsailCdnConfig {
    /// AWS access key ID.
    pub access_key_id: String,
    /// AWS secret access key.
    pub secret_access_key: String,
    /// Region hosting the Lightsail distribution.
    pub region: AwsRegion,
    /// Name of the Lightsail distribution whose cache is reset.
    pub distribution_name: String,
    /// Optional endpoint override (e.g. a local mock server).
    pub endpoint_url: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Log level.
    pub log_level: String,
}

impl Default for LightsailCdnConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: AwsRegion::default(),
            distribution_name: String::new(),
            endpoint_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_owned(),
        }
    }
}

impl fmt::Debug for LightsailCdnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightsailCdnConfig")
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &if self.secret_access_key.is_empty() {
                    ""
                } else {
                    "..."
                },
            )
            .field("region", &self.region)
            .field("distribution_name", &self.distribution_name)
            .field("endpoint_url", &self.endpoint_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl LightsailCdnConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidValue`] if `LIGHTSAIL_TIMEOUT_SECS` is not a
    /// positive integer.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CoreResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get("AWS_ACCESS_KEY_ID") {
            config.access_key_id = v;
        }
        if let Some(v) = get("AWS_SECRET_ACCESS_KEY") {
            config.secret_access_key = v;
        }
        if let Some(v) = get("AWS_DEFAULT_REGION") {
            config.region = AwsRegion::new(v.trim());
        }
        if let Some(v) = get("LIGHTSAIL_DISTRIBUTION_NAME") {
            config.distribution_name = v;
        }
        config.endpoint_url = get("LIGHTSAIL_ENDPOINT_URL");
        if let Some(v) = get("LIGHTSAIL_TIMEOUT_SECS") {
            config.timeout_secs = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(CoreError::InvalidValue {
                        key: "LIGHTSAIL_TIMEOUT_SECS".to_owned(),
                        value: v,
                    });
                }
            };
        }
        if let Some(v) = get("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }

    /// The HTTP timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
