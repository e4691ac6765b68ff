//! Core types and configuration for Lightsail CDN control.
//!
//! This crate holds the pieces shared by the signer, the invoker and the
//! binary: the environment-driven [`LightsailCdnConfig`], the [`AwsRegion`]
//! newtype and the crate-level error type.

mod config;
mod error;
mod types;

pub use config::{DEFAULT_TIMEOUT_SECS, LightsailCdnConfig};
pub use error::{CoreError, CoreResult};
pub use types::AwsRegion;
