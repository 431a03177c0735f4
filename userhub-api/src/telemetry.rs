/// Tracing subscriber setup
///
/// `RUST_LOG` controls filtering; without it the API crate and tower-http
/// log at debug and the shared crate at info. `LOG_FORMAT=json` switches
/// to one JSON object per line.

use crate::config::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "userhub_api=debug,userhub_shared=info,tower_http=debug";

/// Installs the global subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already set
pub fn init(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }

    Ok(())
}
