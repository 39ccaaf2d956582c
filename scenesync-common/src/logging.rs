//! Tracing subscriber setup shared by scenesync binaries
//!
//! Startup is two-phase: config resolution runs under a scoped bootstrap
//! subscriber (so its warnings are visible), then the global subscriber is
//! installed at the configured level.

use crate::config::LoggingConfig;
use crate::{Error, Result};
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Level used before the config file has been read
pub const BOOTSTRAP_LEVEL: &str = "info";

type Subscriber = FmtSubscriber<DefaultFields, Format, EnvFilter>;

/// Subscriber for the config-loading phase
///
/// Honors `RUST_LOG`, otherwise logs at [`BOOTSTRAP_LEVEL`].
pub fn bootstrap_subscriber() -> Subscriber {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_LEVEL));
    build_subscriber(filter)
}

/// Run `f` with the bootstrap subscriber as the thread default
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    tracing::subscriber::with_default(bootstrap_subscriber(), f)
}

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    tracing::subscriber::set_global_default(build_subscriber(filter))
        .map_err(|e| Error::Internal(format!("Failed to install tracing subscriber: {}", e)))
}

fn build_subscriber(filter: EnvFilter) -> Subscriber {
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish()
}
