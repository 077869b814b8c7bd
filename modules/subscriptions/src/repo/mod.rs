//! Subscription persistence
//!
//! Records are keyed by company; a company holds at most one subscription.
//! Rows are never deleted: expiry is derived from dates on read.

mod memory;
mod postgres;

pub use memory::InMemoryRepo;
pub use postgres::PgRepo;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Subscription;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Subscription not found for company_id={company_id}")]
    NotFound { company_id: String },

    #[error("Subscription already exists for company_id={company_id}")]
    Conflict { company_id: String },

    #[error("Subscription for company_id={company_id} was modified concurrently")]
    Stale { company_id: String },

    #[error("Corrupt subscription row: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait SubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &Subscription) -> Result<(), RepoError>;

    async fn find_by_company(&self, company_id: &str) -> Result<Option<Subscription>, RepoError>;

    /// Overwrite the stored record only if its `version` still matches
    ///
    /// Returns the stored copy with the bumped version, or
    /// [`RepoError::Stale`] when another writer got there first.
    async fn update(&self, subscription: &Subscription) -> Result<Subscription, RepoError>;

    async fn list(&self) -> Result<Vec<Subscription>, RepoError>;
}
