use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use super::{Activity, ConversationReference};
use crate::domain::DomainError;

/// Identifier of a resource created by the messaging service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceResponse {
    #[serde(default)]
    pub id: String,
}

/// Delivers activities to the chat surface
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagingTransport: Send + Sync {
    /// Post a new activity into the conversation
    async fn send_activity(
        &self,
        conversation: &ConversationReference,
        activity: Activity,
    ) -> Result<ResourceResponse, DomainError>;

    /// Replace a previously sent activity; `activity.id` names the target
    async fn update_activity(
        &self,
        conversation: &ConversationReference,
        activity: Activity,
    ) -> Result<(), DomainError>;
}
