use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Subscription
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedModule {
    pub module_name: String,
    pub cost: Decimal,
}

/// Stored subscription record for one company
///
/// Status and remaining days are never stored; see [`crate::lifecycle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub company_id: String,
    pub number_of_days: i32,
    pub number_of_users: i32,
    pub selected_modules: Vec<SelectedModule>,
    pub total_amount: Decimal,
    pub subscription_start_date: DateTime<Utc>,
    pub subscription_end_date: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    pub grace_period_end: Option<DateTime<Utc>>,
    pub is_active: bool,
    /// Bumped on every successful update; writes against a stale version fail.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    pub fn has_module(&self, module_name: &str) -> bool {
        self.selected_modules
            .iter()
            .any(|m| m.module_name == module_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    GracePeriod,
    Expired,
}

/// Date-derived state of a subscription at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleState {
    pub status: SubscriptionStatus,
    pub days_remaining: i64,
}

/// Subscription record with its derived fields, as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub subscription_status: SubscriptionStatus,
    pub days_remaining: i64,
}

// ============================================================================
// Requests
// ============================================================================

/// Payment-completion callback that creates a company's subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateSubscriptionRequest {
    pub company_id: String,
    pub number_of_days: i32,
    pub number_of_users: i32,
    #[serde(default)]
    pub selected_modules: Vec<SelectedModule>,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewSubscriptionRequest {
    pub number_of_days: i32,
    pub number_of_users: Option<i32>,
    pub selected_modules: Option<Vec<SelectedModule>>,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

// ============================================================================
// Access gating
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DenialReason {
    UnderMaintenance {
        message: Option<String>,
        end_time: Option<DateTime<Utc>>,
    },
    Deactivated,
    PaymentIncomplete {
        payment_status: PaymentStatus,
    },
    ModuleNotSubscribed,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum AccessDecision {
    Full,
    /// Past the end date but inside the grace window.
    Degraded {
        grace_period_end: Option<DateTime<Utc>>,
    },
    Denied {
        reason: DenialReason,
    },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        !matches!(self, AccessDecision::Denied { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessResponse {
    pub company_id: String,
    pub module_name: String,
    pub granted: bool,
    #[serde(flatten)]
    pub decision: AccessDecision,
}

// ============================================================================
// Cost entries
// ============================================================================

/// Raw form fields
///
/// Amounts arrive as JSON strings or numbers and are parsed leniently;
/// anything non-numeric counts as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateCostRequest {
    #[serde(default)]
    pub net_amount: serde_json::Value,
    #[serde(default)]
    pub tax_rate: serde_json::Value,
    pub tax_type: String,
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange_rate: serde_json::Value,
}

/// Text form of a numeric form field; non-scalar values become empty
pub fn numeric_field_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateCostResponse {
    pub currency: Option<String>,
    pub exchange_rate: Option<String>,
    pub tax_type: String,
    pub total_tax: String,
    pub total_amount: String,
}

// ============================================================================
// Error
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
