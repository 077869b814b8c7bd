//! Subscription lifecycle evaluation and feature gating
//!
//! Status is derived on every read from the stored dates:
//!
//! - `active` while `now < subscription_end_date`
//! - `grace_period` while past the end date but `now < grace_period_end`
//! - `expired` otherwise
//!
//! The end instant itself is already outside the active window.

use chrono::{DateTime, TimeDelta, Utc};
use maintenance_gate::MaintenanceConfig;

use crate::models::{
    AccessDecision, DenialReason, LifecycleState, PaymentStatus, Subscription, SubscriptionStatus,
};

/// Whole days left until `end`, rounding any partial day up; zero once past
pub fn days_remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let remaining = end - now;
    if remaining <= TimeDelta::zero() {
        return 0;
    }

    let days = remaining.num_days();
    if remaining > TimeDelta::days(days) {
        days + 1
    } else {
        days
    }
}

pub fn evaluate(subscription: &Subscription, now: DateTime<Utc>) -> LifecycleState {
    if now < subscription.subscription_end_date {
        return LifecycleState {
            status: SubscriptionStatus::Active,
            days_remaining: days_remaining(subscription.subscription_end_date, now),
        };
    }

    // Grace days are shown as a separate countdown, not as days remaining.
    let status = match subscription.grace_period_end {
        Some(grace_end) if now < grace_end => SubscriptionStatus::GracePeriod,
        _ => SubscriptionStatus::Expired,
    };

    LifecycleState {
        status,
        days_remaining: 0,
    }
}

/// Decide whether `module_name` may be used under this subscription
///
/// Checks run in order: maintenance, the `is_active` flag, payment status,
/// module entitlement, then the date-derived status.
pub fn check_access(
    subscription: &Subscription,
    module_name: &str,
    maintenance: Option<&MaintenanceConfig>,
    now: DateTime<Utc>,
) -> AccessDecision {
    let gate = maintenance_gate::evaluate(maintenance, module_name, now);
    if gate.blocked {
        return AccessDecision::Denied {
            reason: DenialReason::UnderMaintenance {
                message: gate.message,
                end_time: gate.end_time,
            },
        };
    }

    if !subscription.is_active {
        return AccessDecision::Denied {
            reason: DenialReason::Deactivated,
        };
    }

    if subscription.payment_status != PaymentStatus::Completed {
        return AccessDecision::Denied {
            reason: DenialReason::PaymentIncomplete {
                payment_status: subscription.payment_status,
            },
        };
    }

    if !subscription.has_module(module_name) {
        return AccessDecision::Denied {
            reason: DenialReason::ModuleNotSubscribed,
        };
    }

    match evaluate(subscription, now).status {
        SubscriptionStatus::Active => AccessDecision::Full,
        SubscriptionStatus::GracePeriod => AccessDecision::Degraded {
            grace_period_end: subscription.grace_period_end,
        },
        SubscriptionStatus::Expired => AccessDecision::Denied {
            reason: DenialReason::Expired,
        },
    }
}
