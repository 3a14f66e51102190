use std::fmt::Debug;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{SearchQuery, SearchResponse};
use crate::domain::DomainError;

/// Trait for managed document indexes supporting semantic ranking
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug {
    /// Run a query against the configured index
    async fn search(&self, query: SearchQuery) -> Result<SearchResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
