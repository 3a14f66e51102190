//! Semantic search domain models and traits

mod provider;
mod query;
mod result;

pub use provider::SearchProvider;
pub use query::{QueryType, SearchQuery};
pub use result::{RetrievedContext, SearchDocument, SearchResponse};

#[cfg(test)]
pub use provider::MockSearchProvider;
