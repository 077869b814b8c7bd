//! Subscription operations
//!
//! All operations take the current instant explicitly; HTTP handlers read it
//! from the injected [`crate::clock::Clock`].

use chrono::{DateTime, Duration, SubsecRound, Utc};
use maintenance_gate::MaintenanceStore;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::lifecycle;
use crate::models::{
    AccessResponse, ActivateSubscriptionRequest, PaymentStatus, RenewSubscriptionRequest,
    Subscription, SubscriptionStatus, SubscriptionView,
};
use crate::repo::{RepoError, SubscriptionRepo};
use crate::validation::{self, ValidationError};

/// Reload-and-reapply rounds before a contended update gives up with `Stale`
const MAX_UPDATE_ATTEMPTS: u32 = 5;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Payment is not completed (status: {0})")]
    PaymentNotCompleted(PaymentStatus),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepo>,
    maintenance: MaintenanceStore,
    grace_period_days: i64,
}

impl SubscriptionService {
    /// `grace_period_days == 0` disables the grace window for new periods
    pub fn new(
        repo: Arc<dyn SubscriptionRepo>,
        maintenance: MaintenanceStore,
        grace_period_days: i64,
    ) -> Self {
        Self {
            repo,
            maintenance,
            grace_period_days: grace_period_days.max(0),
        }
    }

    pub fn maintenance(&self) -> &MaintenanceStore {
        &self.maintenance
    }

    fn add_days(start: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, ValidationError> {
        Duration::try_days(days)
            .and_then(|d| start.checked_add_signed(d))
            .ok_or(ValidationError::DateOutOfRange)
    }

    fn grace_end_for(&self, end: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, ValidationError> {
        if self.grace_period_days == 0 {
            return Ok(None);
        }
        Self::add_days(end, self.grace_period_days).map(Some)
    }

    async fn load(&self, company_id: &str) -> Result<Subscription, ServiceError> {
        self.repo
            .find_by_company(company_id)
            .await?
            .ok_or_else(|| {
                RepoError::NotFound {
                    company_id: company_id.to_string(),
                }
                .into()
            })
    }

    /// Load, modify and conditionally write back a company's subscription
    ///
    /// `apply` runs against a fresh copy on every attempt, so a write that
    /// lost a race is recomputed from the winner's state.
    async fn update_with<F>(
        &self,
        company_id: &str,
        mut apply: F,
    ) -> Result<Subscription, ServiceError>
    where
        F: FnMut(Subscription) -> Result<Subscription, ServiceError> + Send,
    {
        let mut attempt = 1;
        loop {
            let current = self.load(company_id).await?;
            let next = apply(current)?;
            match self.repo.update(&next).await {
                Err(RepoError::Stale { .. }) if attempt < MAX_UPDATE_ATTEMPTS => {
                    tracing::debug!(
                        company_id = %company_id,
                        attempt,
                        "Subscription changed during update, retrying"
                    );
                    attempt += 1;
                }
                result => return result.map_err(ServiceError::from),
            }
        }
    }

    fn view(subscription: Subscription, now: DateTime<Utc>) -> SubscriptionView {
        let state = lifecycle::evaluate(&subscription, now);
        SubscriptionView {
            subscription,
            subscription_status: state.status,
            days_remaining: state.days_remaining,
        }
    }

    /// Create a company's subscription once its payment has completed
    pub async fn activate_from_payment(
        &self,
        req: ActivateSubscriptionRequest,
        now: DateTime<Utc>,
    ) -> Result<SubscriptionView, ServiceError> {
        // Stored timestamps carry microsecond precision in every backend.
        let now = now.trunc_subsecs(6);

        if req.payment_status != PaymentStatus::Completed {
            tracing::warn!(
                company_id = %req.company_id,
                payment_status = %req.payment_status,
                "Refusing to activate subscription without completed payment"
            );
            return Err(ServiceError::PaymentNotCompleted(req.payment_status));
        }

        validation::validate_company_id(&req.company_id)?;
        validation::validate_plan(
            req.number_of_days,
            req.number_of_users,
            req.total_amount,
            &req.selected_modules,
        )?;

        let end = Self::add_days(now, i64::from(req.number_of_days))?;
        let subscription = Subscription {
            id: Uuid::new_v4(),
            company_id: req.company_id,
            number_of_days: req.number_of_days,
            number_of_users: req.number_of_users,
            selected_modules: req.selected_modules,
            total_amount: req.total_amount,
            subscription_start_date: now,
            subscription_end_date: end,
            payment_status: PaymentStatus::Completed,
            grace_period_end: self.grace_end_for(end)?,
            is_active: true,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        validation::validate_subscription(&subscription)?;
        self.repo.insert(&subscription).await?;

        tracing::info!(
            company_id = %subscription.company_id,
            subscription_id = %subscription.id,
            end_date = %subscription.subscription_end_date,
            "Subscription activated"
        );

        Ok(Self::view(subscription, now))
    }

    /// Renew a subscription after a completed payment
    ///
    /// A still-active subscription is extended from its current end date.
    /// Otherwise the new period replaces the old one and starts at `now`.
    /// Concurrent renewals each add their period.
    pub async fn renew(
        &self,
        company_id: &str,
        req: RenewSubscriptionRequest,
        now: DateTime<Utc>,
    ) -> Result<SubscriptionView, ServiceError> {
        let now = now.trunc_subsecs(6);

        if req.payment_status != PaymentStatus::Completed {
            return Err(ServiceError::PaymentNotCompleted(req.payment_status));
        }

        let mut extended = false;
        let subscription = self
            .update_with(company_id, |mut subscription| {
                let number_of_users = req.number_of_users.unwrap_or(subscription.number_of_users);
                let selected_modules = req
                    .selected_modules
                    .clone()
                    .unwrap_or_else(|| subscription.selected_modules.clone());
                validation::validate_plan(
                    req.number_of_days,
                    number_of_users,
                    req.total_amount,
                    &selected_modules,
                )?;

                extended =
                    lifecycle::evaluate(&subscription, now).status == SubscriptionStatus::Active;

                if extended {
                    subscription.subscription_end_date = Self::add_days(
                        subscription.subscription_end_date,
                        i64::from(req.number_of_days),
                    )?;
                    subscription.number_of_days = subscription
                        .number_of_days
                        .checked_add(req.number_of_days)
                        .ok_or(ValidationError::DateOutOfRange)?;
                } else {
                    subscription.subscription_start_date = now;
                    subscription.subscription_end_date =
                        Self::add_days(now, i64::from(req.number_of_days))?;
                    subscription.number_of_days = req.number_of_days;
                }

                subscription.grace_period_end =
                    self.grace_end_for(subscription.subscription_end_date)?;
                subscription.number_of_users = number_of_users;
                subscription.selected_modules = selected_modules;
                subscription.total_amount = req.total_amount;
                subscription.payment_status = PaymentStatus::Completed;
                subscription.is_active = true;
                subscription.updated_at = now;

                validation::validate_subscription(&subscription)?;
                Ok(subscription)
            })
            .await?;

        tracing::info!(
            company_id = %subscription.company_id,
            extended,
            end_date = %subscription.subscription_end_date,
            "Subscription renewed"
        );

        Ok(Self::view(subscription, now))
    }

    /// Toggle the administrative `is_active` flag
    pub async fn set_active(
        &self,
        company_id: &str,
        is_active: bool,
        now: DateTime<Utc>,
    ) -> Result<SubscriptionView, ServiceError> {
        let now = now.trunc_subsecs(6);
        let subscription = self
            .update_with(company_id, |mut subscription| {
                subscription.is_active = is_active;
                subscription.updated_at = now;
                Ok(subscription)
            })
            .await?;

        tracing::info!(company_id = %company_id, is_active, "Subscription active flag changed");

        Ok(Self::view(subscription, now))
    }

    pub async fn status(
        &self,
        company_id: &str,
        now: DateTime<Utc>,
    ) -> Result<SubscriptionView, ServiceError> {
        let subscription = self.load(company_id).await?;
        Ok(Self::view(subscription, now))
    }

    pub async fn list_statuses(&self, now: DateTime<Utc>) -> Result<Vec<SubscriptionView>, ServiceError> {
        let all = self.repo.list().await?;
        Ok(all.into_iter().map(|s| Self::view(s, now)).collect())
    }

    /// Gate access to a module against the current maintenance snapshot
    pub async fn check_access(
        &self,
        company_id: &str,
        module_name: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessResponse, ServiceError> {
        let subscription = self.load(company_id).await?;
        let snapshot = self.maintenance.snapshot().await;
        let decision =
            lifecycle::check_access(&subscription, module_name, snapshot.as_deref(), now);

        tracing::debug!(
            company_id = %company_id,
            module_name = %module_name,
            granted = decision.is_granted(),
            "Access decision"
        );

        Ok(AccessResponse {
            company_id: company_id.to_string(),
            module_name: module_name.to_string(),
            granted: decision.is_granted(),
            decision,
        })
    }
}
