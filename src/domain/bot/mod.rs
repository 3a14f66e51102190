//! Chat activity types and the messaging transport seam

mod activity;
mod task_module;
mod transport;

pub use activity::{
    Activity, ActivityType, Attachment, ChannelAccount, ConversationAccount,
    ConversationReference, ADAPTIVE_CARD_CONTENT_TYPE,
};
pub use task_module::{TaskModuleContinue, TaskModuleRequest, TaskModuleResponse, TaskModuleTask};
pub use transport::{MessagingTransport, ResourceResponse};

#[cfg(test)]
pub use transport::MockMessagingTransport;
