//! Subset of the Bot Framework activity schema used by the bot

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content type of adaptive card attachments
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// Activity type discriminator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    #[default]
    Message,
    Invoke,
    ConversationUpdate,
    #[serde(other)]
    Other,
}

/// A user or bot account on the channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aad_object_id: Option<String>,
}

/// The conversation an activity belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aad_object_id: Option<String>,
}

/// Card or file attached to a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    pub content: Value,
}

impl Attachment {
    pub fn adaptive_card(content: Value) -> Self {
        Self {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
            content,
        }
    }
}

/// An incoming or outgoing activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type", default)]
    pub activity_type: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub from: ChannelAccount,
    #[serde(default)]
    pub conversation: ConversationAccount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    /// Invoke name, e.g. `task/submit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Activity {
    /// Outgoing message carrying a single card
    pub fn message_with_attachment(attachment: Attachment) -> Self {
        Self {
            activity_type: ActivityType::Message,
            attachments: vec![attachment],
            ..Self::default()
        }
    }

    /// Replacement for the sent message `activity_id`
    pub fn card_update(
        activity_id: impl Into<String>,
        conversation: ConversationAccount,
        attachment: Attachment,
    ) -> Self {
        Self {
            activity_type: ActivityType::Message,
            id: Some(activity_id.into()),
            conversation,
            attachments: vec![attachment],
            ..Self::default()
        }
    }

    pub fn with_text_format(mut self, format: impl Into<String>) -> Self {
        self.text_format = Some(format.into());
        self
    }

    /// Where replies to this activity are delivered
    pub fn conversation_reference(&self) -> ConversationReference {
        ConversationReference {
            service_url: self.service_url.clone().unwrap_or_default(),
            conversation: self.conversation.clone(),
        }
    }

    /// Display name of the sender, empty when the channel omitted it
    pub fn from_name(&self) -> &str {
        self.from.name.as_deref().unwrap_or_default()
    }

    /// AAD object id of the sender, empty when the channel omitted it
    pub fn from_aad_object_id(&self) -> &str {
        self.from.aad_object_id.as_deref().unwrap_or_default()
    }
}

/// Enough of a conversation to post into it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReference {
    pub service_url: String,
    pub conversation: ConversationAccount,
}
