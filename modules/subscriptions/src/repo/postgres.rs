use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{RepoError, SubscriptionRepo};
use crate::models::{SelectedModule, Subscription};

/// Raw `subscriptions` row; `payment_status` is stored as text
#[derive(Debug, FromRow)]
struct SubscriptionRow {
    id: Uuid,
    company_id: String,
    number_of_days: i32,
    number_of_users: i32,
    selected_modules: Json<Vec<SelectedModule>>,
    total_amount: Decimal,
    subscription_start_date: DateTime<Utc>,
    subscription_end_date: DateTime<Utc>,
    payment_status: String,
    grace_period_end: Option<DateTime<Utc>>,
    is_active: bool,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = RepoError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let payment_status = row.payment_status.parse().map_err(RepoError::Corrupt)?;
        Ok(Subscription {
            id: row.id,
            company_id: row.company_id,
            number_of_days: row.number_of_days,
            number_of_users: row.number_of_users,
            selected_modules: row.selected_modules.0,
            total_amount: row.total_amount,
            subscription_start_date: row.subscription_start_date,
            subscription_end_date: row.subscription_end_date,
            payment_status,
            grace_period_end: row.grace_period_end,
            is_active: row.is_active,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, company_id, number_of_days, number_of_users, selected_modules,
           total_amount, subscription_start_date, subscription_end_date,
           payment_status, grace_period_end, is_active, version, created_at, updated_at
    FROM subscriptions
"#;

/// Postgres-backed repository
#[derive(Clone)]
pub struct PgRepo {
    pool: PgPool,
}

impl PgRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepo for PgRepo {
    async fn insert(&self, subscription: &Subscription) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, company_id, number_of_days, number_of_users, selected_modules,
                total_amount, subscription_start_date, subscription_end_date,
                payment_status, grace_period_end, is_active, version, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(subscription.id)
        .bind(&subscription.company_id)
        .bind(subscription.number_of_days)
        .bind(subscription.number_of_users)
        .bind(Json(&subscription.selected_modules))
        .bind(subscription.total_amount)
        .bind(subscription.subscription_start_date)
        .bind(subscription.subscription_end_date)
        .bind(subscription.payment_status.as_str())
        .bind(subscription.grace_period_end)
        .bind(subscription.is_active)
        .bind(subscription.version)
        .bind(subscription.created_at)
        .bind(subscription.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RepoError::Conflict {
                    company_id: subscription.company_id.clone(),
                })
            }
            Err(e) => Err(RepoError::Database(e)),
        }
    }

    async fn find_by_company(&self, company_id: &str) -> Result<Option<Subscription>, RepoError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "{} WHERE company_id = $1",
            SELECT_COLUMNS
        ))
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Subscription::try_from).transpose()
    }

    async fn update(&self, subscription: &Subscription) -> Result<Subscription, RepoError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            UPDATE subscriptions
            SET number_of_days = $2,
                number_of_users = $3,
                selected_modules = $4,
                total_amount = $5,
                subscription_start_date = $6,
                subscription_end_date = $7,
                payment_status = $8,
                grace_period_end = $9,
                is_active = $10,
                updated_at = $11,
                version = version + 1
            WHERE company_id = $1 AND version = $12
            RETURNING id, company_id, number_of_days, number_of_users, selected_modules,
                      total_amount, subscription_start_date, subscription_end_date,
                      payment_status, grace_period_end, is_active, version, created_at, updated_at
            "#,
        )
        .bind(&subscription.company_id)
        .bind(subscription.number_of_days)
        .bind(subscription.number_of_users)
        .bind(Json(&subscription.selected_modules))
        .bind(subscription.total_amount)
        .bind(subscription.subscription_start_date)
        .bind(subscription.subscription_end_date)
        .bind(subscription.payment_status.as_str())
        .bind(subscription.grace_period_end)
        .bind(subscription.is_active)
        .bind(subscription.updated_at)
        .bind(subscription.version)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Subscription::try_from(row);
        }

        // Nothing matched: either the row is gone or its version moved on.
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT version FROM subscriptions WHERE company_id = $1")
                .bind(&subscription.company_id)
                .fetch_optional(&self.pool)
                .await?;

        let company_id = subscription.company_id.clone();
        Err(match exists {
            Some(_) => RepoError::Stale { company_id },
            None => RepoError::NotFound { company_id },
        })
    }

    async fn list(&self) -> Result<Vec<Subscription>, RepoError> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "{} ORDER BY company_id",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Subscription::try_from).collect()
    }
}
