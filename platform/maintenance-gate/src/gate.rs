//! Pure maintenance predicates
//!
//! A flag is in effect when it is enabled and its `end_time` is either absent
//! or still in the future. The global flag takes precedence over module flags.

use chrono::{DateTime, Utc};

use crate::models::{MaintenanceConfig, MaintenanceScope, MaintenanceStatus};

fn flag_in_effect(is_enabled: bool, end_time: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    is_enabled && end_time.map_or(true, |end| end > now)
}

/// Evaluate a module against a configuration snapshot
///
/// A missing configuration means no maintenance.
pub fn evaluate(
    config: Option<&MaintenanceConfig>,
    module_name: &str,
    now: DateTime<Utc>,
) -> MaintenanceStatus {
    let Some(config) = config else {
        return MaintenanceStatus::open(module_name);
    };

    if flag_in_effect(config.is_enabled, config.end_time, now) {
        return MaintenanceStatus {
            module_name: module_name.to_string(),
            blocked: true,
            scope: Some(MaintenanceScope::Global),
            message: config.message.clone(),
            end_time: config.end_time,
        };
    }

    match config.module(module_name) {
        Some(entry) if flag_in_effect(entry.is_enabled, entry.end_time, now) => MaintenanceStatus {
            module_name: module_name.to_string(),
            blocked: true,
            scope: Some(MaintenanceScope::Module),
            message: entry.message.clone(),
            end_time: entry.end_time,
        },
        _ => MaintenanceStatus::open(module_name),
    }
}

pub fn is_module_under_maintenance(
    config: Option<&MaintenanceConfig>,
    module_name: &str,
    now: DateTime<Utc>,
) -> bool {
    evaluate(config, module_name, now).blocked
}

/// Message of the flag currently blocking `module_name`, if any
pub fn get_maintenance_message(
    config: Option<&MaintenanceConfig>,
    module_name: &str,
    now: DateTime<Utc>,
) -> Option<String> {
    evaluate(config, module_name, now).message
}

/// End time of the flag currently blocking `module_name`, if any
pub fn get_maintenance_end_time(
    config: Option<&MaintenanceConfig>,
    module_name: &str,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    evaluate(config, module_name, now).end_time
}
