//! Domain layer - Core business logic and entities

pub mod activity;
pub mod answer;
pub mod bot;
pub mod card;
pub mod config;
pub mod error;
pub mod llm;
pub mod qna;
pub mod search;

pub use activity::{ActivityEntity, ActivityStorage};
pub use answer::{AnswerOutcome, CompletionSettings, EditOutcome};
pub use bot::{
    Activity, ActivityType, Attachment, ConversationReference, MessagingTransport,
    TaskModuleRequest, TaskModuleResponse,
};
pub use card::{QnaForm, ResponseCardPayload};
pub use config::{ConfigurationDataProvider, KNOWLEDGE_BASE_ENTITY_ID};
pub use error::DomainError;
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
pub use qna::{AnswerQuery, KnowledgeBaseAnswer, QnaPair, QuestionAnswerProvider};
pub use search::{RetrievedContext, SearchDocument, SearchProvider, SearchQuery, SearchResponse};
