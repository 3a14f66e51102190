//! Saved configuration entities (knowledge base id, team id, ...)

mod repository;

pub use repository::ConfigurationDataProvider;

#[cfg(test)]
pub use repository::MockConfigurationDataProvider;

/// Entity key under which the knowledge base id is saved
pub const KNOWLEDGE_BASE_ENTITY_ID: &str = "KnowledgeBaseId";
