//! Tracing subscriber setup

use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global subscriber.
///
/// `prod` logs JSON at `info`; any other environment logs human-readable
/// text at `debug`. `RUST_LOG` overrides the default filter either way.
pub fn init(env: &str) -> Result<()> {
    let production = env == "prod";
    let default_filter = if production {
        "info,sqlx=warn"
    } else {
        "debug,sqlx=warn,hyper=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = FmtSubscriber::builder().with_env_filter(filter);

    let installed = if production {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("setting default subscriber failed: {}", e))
}
