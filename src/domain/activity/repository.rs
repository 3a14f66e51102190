use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::ActivityEntity;
use crate::domain::DomainError;

/// Storage for sent message references
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ActivityStorage: Send + Sync {
    /// Entities stored under a reference id
    async fn get(&self, activity_reference_id: &str) -> Result<Vec<ActivityEntity>, DomainError>;

    /// Save or replace an entity
    async fn upsert(&self, entity: ActivityEntity) -> Result<(), DomainError>;
}
