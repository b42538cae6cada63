//! Shared fixtures for the workspace's benches and scenario tests.

use anyhow::Result;
use build_limits::BuildLimitsConfig;
use tracing_subscriber::{fmt, EnvFilter};

pub mod bench_support;

// Re-exported so benches and tests depend on one crate.
pub use build_limits;
pub use serde_json;

/// Installs a global `fmt` subscriber. `RUST_LOG` wins over the configured
/// level.
pub fn init_tracing(config: &BuildLimitsConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(anyhow::Error::from_boxed)?;
    Ok(())
}
