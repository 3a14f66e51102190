//! In-memory configuration entity storage

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{ConfigurationDataProvider, DomainError};

/// In-memory implementation of ConfigurationDataProvider
#[derive(Debug, Default)]
pub struct InMemoryConfigurationDataProvider {
    entities: RwLock<HashMap<String, String>>,
}

impl InMemoryConfigurationDataProvider {
    /// Creates a new empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entity, e.g. the knowledge base id from configuration
    pub fn with_entity(mut self, entity_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities
            .get_mut()
            .insert(entity_id.into(), value.into());
        self
    }
}

#[async_trait]
impl ConfigurationDataProvider for InMemoryConfigurationDataProvider {
    async fn get_saved_entity_detail(
        &self,
        entity_id: &str,
    ) -> Result<Option<String>, DomainError> {
        let entities = self.entities.read().await;
        Ok(entities.get(entity_id).cloned())
    }

    async fn upsert_entity(&self, entity_id: &str, value: &str) -> Result<(), DomainError> {
        let mut entities = self.entities.write().await;
        entities.insert(entity_id.to_string(), value.to_string());
        Ok(())
    }
}
