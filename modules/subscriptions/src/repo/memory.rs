use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{RepoError, SubscriptionRepo};
use crate::models::Subscription;

/// Repository backed by a process-local map
///
/// Suitable for unit tests and local development without Postgres.
#[derive(Clone, Default)]
pub struct InMemoryRepo {
    records: Arc<RwLock<HashMap<String, Subscription>>>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepo for InMemoryRepo {
    async fn insert(&self, subscription: &Subscription) -> Result<(), RepoError> {
        let mut records = self.records.write().await;
        if records.contains_key(&subscription.company_id) {
            return Err(RepoError::Conflict {
                company_id: subscription.company_id.clone(),
            });
        }
        records.insert(subscription.company_id.clone(), subscription.clone());
        Ok(())
    }

    async fn find_by_company(&self, company_id: &str) -> Result<Option<Subscription>, RepoError> {
        Ok(self.records.read().await.get(company_id).cloned())
    }

    async fn update(&self, subscription: &Subscription) -> Result<Subscription, RepoError> {
        let mut records = self.records.write().await;
        let existing = records
            .get_mut(&subscription.company_id)
            .ok_or_else(|| RepoError::NotFound {
                company_id: subscription.company_id.clone(),
            })?;

        if existing.version != subscription.version {
            return Err(RepoError::Stale {
                company_id: subscription.company_id.clone(),
            });
        }

        let mut stored = subscription.clone();
        stored.version += 1;
        *existing = stored.clone();
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Subscription>, RepoError> {
        let mut all: Vec<Subscription> = self.records.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.company_id.cmp(&b.company_id));
        Ok(all)
    }
}
