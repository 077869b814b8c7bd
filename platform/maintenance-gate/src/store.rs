use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::gate::evaluate;
use crate::models::{MaintenanceConfig, MaintenanceStatus};

/// Holder of the current maintenance configuration snapshot
///
/// Cloning the store shares the same snapshot slot.
#[derive(Clone, Default)]
pub struct MaintenanceStore {
    current: Arc<RwLock<Option<Arc<MaintenanceConfig>>>>,
}

impl MaintenanceStore {
    /// Create an empty store (no maintenance until a snapshot arrives)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MaintenanceConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(Arc::new(config)))),
        }
    }

    /// Current snapshot; `None` until the first successful refresh
    pub async fn snapshot(&self) -> Option<Arc<MaintenanceConfig>> {
        self.current.read().await.clone()
    }

    /// Replace the snapshot wholesale
    pub async fn replace(&self, config: MaintenanceConfig) {
        let mut guard = self.current.write().await;
        *guard = Some(Arc::new(config));
    }

    /// Evaluate a module against the current snapshot
    pub async fn status(&self, module_name: &str, now: DateTime<Utc>) -> MaintenanceStatus {
        let snapshot = self.snapshot().await;
        evaluate(snapshot.as_deref(), module_name, now)
    }
}
