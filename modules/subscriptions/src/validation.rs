//! Write-time validation for subscription records
//!
//! The lifecycle evaluator assumes well-ordered dates, so records are checked
//! before every insert and update.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{SelectedModule, Subscription};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("company_id cannot be empty")]
    EmptyCompanyId,

    #[error("number_of_days must be positive, got {0}")]
    NonPositiveDays(i32),

    #[error("number_of_users must be positive, got {0}")]
    NonPositiveUsers(i32),

    #[error("total_amount must be non-negative, got {0}")]
    NegativeTotalAmount(Decimal),

    #[error("total_amount must have at most 2 decimal places, got {0}")]
    TotalAmountPrecision(Decimal),

    #[error("Module {0}: module_name cannot be empty")]
    EmptyModuleName(usize),

    #[error("Module {0}: cost must be non-negative, got {1}")]
    NegativeModuleCost(usize, Decimal),

    #[error("Module {0}: cost must have at most 2 decimal places, got {1}")]
    ModuleCostPrecision(usize, Decimal),

    #[error("subscription_end_date ({end}) must be after subscription_start_date ({start})")]
    EndNotAfterStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("grace_period_end ({grace}) must not precede subscription_end_date ({end})")]
    GraceBeforeEnd {
        end: DateTime<Utc>,
        grace: DateTime<Utc>,
    },

    #[error("Subscription period is out of the supported date range")]
    DateOutOfRange,
}

/// Decimal places stored for money; matches the `NUMERIC(18, 2)` columns
pub const MONEY_SCALE: u32 = 2;

fn exceeds_money_scale(amount: Decimal) -> bool {
    amount.normalize().scale() > MONEY_SCALE
}

pub fn validate_company_id(company_id: &str) -> Result<(), ValidationError> {
    if company_id.trim().is_empty() {
        return Err(ValidationError::EmptyCompanyId);
    }
    Ok(())
}

/// Validate plan sizing and pricing fields shared by activation and renewal
pub fn validate_plan(
    number_of_days: i32,
    number_of_users: i32,
    total_amount: Decimal,
    modules: &[SelectedModule],
) -> Result<(), ValidationError> {
    if number_of_days <= 0 {
        return Err(ValidationError::NonPositiveDays(number_of_days));
    }

    if number_of_users <= 0 {
        return Err(ValidationError::NonPositiveUsers(number_of_users));
    }

    if total_amount.is_sign_negative() && !total_amount.is_zero() {
        return Err(ValidationError::NegativeTotalAmount(total_amount));
    }

    if exceeds_money_scale(total_amount) {
        return Err(ValidationError::TotalAmountPrecision(total_amount));
    }

    for (idx, module) in modules.iter().enumerate() {
        if module.module_name.trim().is_empty() {
            return Err(ValidationError::EmptyModuleName(idx));
        }
        if module.cost.is_sign_negative() && !module.cost.is_zero() {
            return Err(ValidationError::NegativeModuleCost(idx, module.cost));
        }
        if exceeds_money_scale(module.cost) {
            return Err(ValidationError::ModuleCostPrecision(idx, module.cost));
        }
    }

    Ok(())
}

/// Validate a complete subscription record
///
/// # Validation Rules
///
/// - `company_id`: non-empty
/// - `number_of_days`, `number_of_users`: > 0
/// - `total_amount` and each module cost: >= 0, at most two decimal places
/// - `subscription_end_date` > `subscription_start_date`
/// - `grace_period_end`, when present, >= `subscription_end_date`
pub fn validate_subscription(subscription: &Subscription) -> Result<(), ValidationError> {
    validate_company_id(&subscription.company_id)?;
    validate_plan(
        subscription.number_of_days,
        subscription.number_of_users,
        subscription.total_amount,
        &subscription.selected_modules,
    )?;

    if subscription.subscription_end_date <= subscription.subscription_start_date {
        return Err(ValidationError::EndNotAfterStart {
            start: subscription.subscription_start_date,
            end: subscription.subscription_end_date,
        });
    }

    if let Some(grace) = subscription.grace_period_end {
        if grace < subscription.subscription_end_date {
            return Err(ValidationError::GraceBeforeEnd {
                end: subscription.subscription_end_date,
                grace,
            });
        }
    }

    Ok(())
}
