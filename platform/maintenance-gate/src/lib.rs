//! # Maintenance Gate
//!
//! Runtime check that blocks access to the whole platform or to a single
//! module while an administrative maintenance flag is in effect.
//!
//! ## Model
//!
//! The maintenance configuration is an immutable value. A [`MaintenanceStore`]
//! holds the current snapshot and swaps it wholesale when a
//! [`MaintenanceSource`] delivers a new one, so readers always see either the
//! old or the new configuration, never a mix.
//!
//! The gate functions are pure and take the current instant explicitly. A flag
//! whose `end_time` has passed stops blocking on its own, so callers must
//! evaluate on every access decision instead of caching the result.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use maintenance_gate::{evaluate, MaintenanceConfig};
//!
//! let config = MaintenanceConfig {
//!     is_enabled: true,
//!     message: Some("Database upgrade".to_string()),
//!     ..Default::default()
//! };
//!
//! let status = evaluate(Some(&config), "inspections", Utc::now());
//! assert!(status.blocked);
//! assert_eq!(status.message.as_deref(), Some("Database upgrade"));
//! ```

mod gate;
mod models;
mod refresher;
mod source;
mod store;

pub use gate::{
    evaluate, get_maintenance_end_time, get_maintenance_message, is_module_under_maintenance,
};
pub use models::{MaintenanceConfig, MaintenanceScope, MaintenanceStatus, ModuleMaintenance};
pub use refresher::{refresh_once, spawn_refresher};
pub use source::{HttpSource, MaintenanceSource, SourceError, StaticSource};
pub use store::MaintenanceStore;
