use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for hosted chat completion endpoints
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request to the given deployment
    async fn chat(
        &self,
        deployment: &str,
        request: LlmRequest,
    ) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
