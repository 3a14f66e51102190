//! In-memory activity storage

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{ActivityEntity, ActivityStorage, DomainError};

/// In-memory implementation of ActivityStorage
#[derive(Debug, Default)]
pub struct InMemoryActivityStorage {
    entities: RwLock<HashMap<String, ActivityEntity>>,
}

impl InMemoryActivityStorage {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityStorage for InMemoryActivityStorage {
    async fn get(&self, activity_reference_id: &str) -> Result<Vec<ActivityEntity>, DomainError> {
        let entities = self.entities.read().await;

        Ok(entities
            .get(activity_reference_id)
            .cloned()
            .into_iter()
            .collect())
    }

    async fn upsert(&self, entity: ActivityEntity) -> Result<(), DomainError> {
        let mut entities = self.entities.write().await;
        entities.insert(entity.activity_reference_id.clone(), entity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_and_get() {
        let storage = InMemoryActivityStorage::new();
        storage
            .upsert(ActivityEntity::new("ref-1", "1:activity"))
            .await
            .unwrap();

        let found = storage.get("ref-1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].activity_id, "1:activity");

        assert!(storage.get("ref-2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_activity_id() {
        let storage = InMemoryActivityStorage::new();
        storage.upsert(ActivityEntity::new("ref-1", "old")).await.unwrap();
        storage.upsert(ActivityEntity::new("ref-1", "new")).await.unwrap();

        let found = storage.get("ref-1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].activity_id, "new");
    }
}
