use async_trait::async_trait;
use chrono::{Duration, Utc};
use maintenance_gate::{
    refresh_once, spawn_refresher, MaintenanceConfig, MaintenanceSource, MaintenanceStore,
    ModuleMaintenance, SourceError, StaticSource,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Succeeds on the first call, fails afterwards
struct FlakySource {
    calls: AtomicUsize,
}

#[async_trait]
impl MaintenanceSource for FlakySource {
    async fn fetch(&self) -> Result<MaintenanceConfig, SourceError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(MaintenanceConfig {
                is_enabled: true,
                message: Some("first".to_string()),
                ..Default::default()
            })
        } else {
            Err(SourceError::Http("connection refused".to_string()))
        }
    }
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let store = MaintenanceStore::new();
    let source = FlakySource {
        calls: AtomicUsize::new(0),
    };

    refresh_once(&store, &source).await.unwrap();
    assert!(refresh_once(&store, &source).await.is_err());

    let snapshot = store.snapshot().await.expect("snapshot installed");
    assert_eq!(snapshot.message.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_spawned_refresher_installs_snapshot() {
    let store = MaintenanceStore::new();
    let source = Arc::new(StaticSource::new(MaintenanceConfig {
        modules: vec![ModuleMaintenance {
            module_name: "supplier_portal".to_string(),
            is_enabled: true,
            message: None,
            end_time: None,
        }],
        ..Default::default()
    }));

    let handle = spawn_refresher(store.clone(), source, std::time::Duration::from_secs(60));

    let mut installed = false;
    for _ in 0..50 {
        if store.snapshot().await.is_some() {
            installed = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    handle.abort();

    assert!(installed, "refresher should install a snapshot on its first tick");
    assert!(store.status("supplier_portal", Utc::now()).await.blocked);
    assert!(!store.status("inspections", Utc::now()).await.blocked);
}

#[test]
fn test_config_decodes_admin_payload() {
    let end = Utc::now() + Duration::hours(3);
    let payload = serde_json::json!({
        "is_enabled": false,
        "message": null,
        "modules": [
            {
                "module_name": "trade_ins",
                "is_enabled": true,
                "message": "Valuation provider offline",
                "end_time": end.to_rfc3339()
            },
            { "module_name": "workshop" }
        ]
    });

    let config: MaintenanceConfig = serde_json::from_value(payload).unwrap();

    assert!(!config.is_enabled);
    assert_eq!(config.end_time, None);
    assert_eq!(config.modules.len(), 2);
    assert!(!config.modules[1].is_enabled);
    assert_eq!(
        maintenance_gate::get_maintenance_message(Some(&config), "trade_ins", Utc::now()).as_deref(),
        Some("Valuation provider offline")
    );
}
