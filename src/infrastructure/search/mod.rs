//! Search provider implementations

mod azure_search;

pub use azure_search::{AzureSearchConfig, AzureSearchProvider};
