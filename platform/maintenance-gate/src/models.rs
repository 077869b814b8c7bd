use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maintenance flag for a single module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModuleMaintenance {
    pub module_name: String,
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

/// Platform-wide maintenance configuration
///
/// Fetched from the admin configuration endpoint and replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MaintenanceConfig {
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modules: Vec<ModuleMaintenance>,
}

impl MaintenanceConfig {
    pub fn module(&self, module_name: &str) -> Option<&ModuleMaintenance> {
        self.modules.iter().find(|m| m.module_name == module_name)
    }
}

/// Which flag produced a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceScope {
    Global,
    Module,
}

/// Result of evaluating one module against one configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceStatus {
    pub module_name: String,
    pub blocked: bool,
    pub scope: Option<MaintenanceScope>,
    pub message: Option<String>,
    pub end_time: Option<DateTime<Utc>>,
}

impl MaintenanceStatus {
    pub fn open(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            blocked: false,
            scope: None,
            message: None,
            end_time: None,
        }
    }
}
