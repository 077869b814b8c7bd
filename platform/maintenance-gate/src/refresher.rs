use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::source::{MaintenanceSource, SourceError};
use crate::store::MaintenanceStore;

/// Fetch once and install the result; the previous snapshot is kept on error
pub async fn refresh_once(
    store: &MaintenanceStore,
    source: &dyn MaintenanceSource,
) -> Result<(), SourceError> {
    let config = source.fetch().await?;

    tracing::debug!(
        global_enabled = config.is_enabled,
        module_flags = config.modules.len(),
        "Maintenance config refreshed"
    );

    store.replace(config).await;
    Ok(())
}

/// Spawn a background task polling `source` every `interval`
///
/// The first fetch happens immediately.
pub fn spawn_refresher(
    store: MaintenanceStore,
    source: Arc<dyn MaintenanceSource>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(e) = refresh_once(&store, source.as_ref()).await {
                tracing::warn!(error = %e, "Failed to refresh maintenance config, keeping previous snapshot");
            }
        }
    })
}
