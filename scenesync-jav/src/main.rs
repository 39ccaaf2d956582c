//! scenesync-jav - incremental scene metadata sync
//!
//! Reads `video.json`, fetches every scene not yet in `scene_details.json`,
//! and writes results, side tables, and failures next to it. Settings come
//! from `scenesync.toml` and `SCENESYNC_API_TOKEN`; there are no flags.

use anyhow::Result;
use scenesync_common::config::SyncConfig;
use scenesync_common::logging::{init_tracing, with_bootstrap_logging};
use scenesync_jav::fetch::{JavApiClient, TokioSleeper};
use scenesync_jav::run_sync;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = with_bootstrap_logging(SyncConfig::load);
    init_tracing(&config.logging)?;

    info!("Starting scenesync-jav {}", env!("CARGO_PKG_VERSION"));
    info!(
        input = %config.input_file.display(),
        output = %config.output_file.display(),
        max_retries = config.max_attempts(),
        "Configuration loaded"
    );

    let client = JavApiClient::new(&config)?;

    if let Err(e) = run_sync(&config, &client, &TokioSleeper).await {
        error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}
