//! Lightsail CDN - clear a Lightsail distribution cache on demand.
//!
//! Runs a single `ResetDistributionCache` call and exits. Suitable for cron
//! jobs, deploy hooks, or running by hand after publishing content.
//!
//! # Usage
//!
//! ```text
//! lightsail-cdn [clear]   # reset the cache; exit 0 on success, 1 on failure
//! lightsail-cdn status    # print which settings are present as JSON
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_ACCESS_KEY_ID` | *(empty)* | Access key ID |
//! | `AWS_SECRET_ACCESS_KEY` | *(empty)* | Secret access key |
//! | `AWS_DEFAULT_REGION` | `us-east-1` | Region hosting the distribution |
//! | `LIGHTSAIL_DISTRIBUTION_NAME` | *(empty)* | Distribution whose cache is reset |
//! | `LIGHTSAIL_ENDPOINT_URL` | *(unset)* | Endpoint override, e.g. a local mock |
//! | `LIGHTSAIL_TIMEOUT_SECS` | `15` | HTTP timeout in seconds |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use lightsail_cdn_client::{
    CredentialsStatus, LightsailClient, TargetConfig, credentials_from_config,
};
use lightsail_cdn_core::LightsailCdnConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// What the process was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Clear,
    Status,
}

/// Parse the arguments after the program name. No argument means `clear`.
fn parse_command<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = match args.next().as_deref() {
        None | Some("clear") => Command::Clear,
        Some("status") => Command::Status,
        Some(other) => bail!("unknown command: {other} (expected `clear` or `status`)"),
    };

    if let Some(extra) = args.next() {
        bail!("unexpected argument: {extra}");
    }

    Ok(command)
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config
/// value. Logs go to stderr so stdout carries only the result.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

async fn run_clear(config: &LightsailCdnConfig) -> Result<bool> {
    let client =
        LightsailClient::from_config(config).context("failed to create HTTP client")?;
    let creds = credentials_from_config(config);
    let target = TargetConfig::from_config(config);

    info!(
        distribution = %target.distribution_name,
        region = %target.region,
        endpoint = ?target.endpoint,
        "clearing Lightsail CDN cache",
    );

    let result = client.invoke(&creds, &target).await;
    println!("{}", result.message);

    Ok(result.success)
}

fn run_status(config: &LightsailCdnConfig) -> Result<bool> {
    let status = CredentialsStatus::inspect(
        &credentials_from_config(config),
        &TargetConfig::from_config(config),
    );
    let json = serde_json::to_string_pretty(&status).context("failed to serialize status")?;
    println!("{json}");

    Ok(true)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let command = parse_command(std::env::args().skip(1))?;

    let config = LightsailCdnConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.log_level)?;
    debug!(?config, ?command, "loaded configuration");

    let ok = match command {
        Command::Clear => run_clear(&config).await?,
        Command::Status => run_status(&config)?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
