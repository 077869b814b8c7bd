#![allow(dead_code)]

use axum::body::Body;
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use maintenance_gate::{MaintenanceConfig, MaintenanceStore};
use std::sync::Arc;

use subscriptions_rs::{
    repo::InMemoryRepo, subscriptions_router, AppState, FixedClock, SubscriptionService,
};

pub const GRACE_DAYS: i64 = 7;

/// Fixed "now" used across the suite
pub fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-04-01T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn service(maintenance: MaintenanceStore) -> Arc<SubscriptionService> {
    Arc::new(SubscriptionService::new(
        Arc::new(InMemoryRepo::new()),
        maintenance,
        GRACE_DAYS,
    ))
}

/// Router over an in-memory repository with the clock pinned at `at`
pub fn app_at(service: Arc<SubscriptionService>, at: DateTime<Utc>) -> Router {
    subscriptions_router(AppState {
        service,
        clock: Arc::new(FixedClock(at)),
    })
}

pub fn app() -> Router {
    app_at(service(MaintenanceStore::new()), now())
}

pub fn app_with_maintenance(config: MaintenanceConfig) -> Router {
    app_at(service(MaintenanceStore::with_config(config)), now())
}

pub fn activation_body(company_id: &str, days: i32) -> serde_json::Value {
    serde_json::json!({
        "company_id": company_id,
        "number_of_days": days,
        "number_of_users": 4,
        "selected_modules": [
            { "module_name": "inspections", "cost": "49.00" },
            { "module_name": "trade_ins", "cost": "29.00" }
        ],
        "total_amount": "78.00",
        "payment_status": "completed"
    })
}

/// Read response body as JSON.
pub async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
