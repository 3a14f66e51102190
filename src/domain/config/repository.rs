//! Repository trait for saved configuration entities

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::error::DomainError;

/// Repository trait for configuration values saved by administrators
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConfigurationDataProvider: Send + Sync {
    /// Get the saved value of an entity, `None` when it was never saved
    async fn get_saved_entity_detail(
        &self,
        entity_id: &str,
    ) -> Result<Option<String>, DomainError>;

    /// Save or replace the value of an entity
    async fn upsert_entity(&self, entity_id: &str, value: &str) -> Result<(), DomainError>;
}
