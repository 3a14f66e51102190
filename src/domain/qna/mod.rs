//! Question answering knowledge base models and traits

mod entity;
mod provider;

pub use entity::{
    AnswerQuery, KnowledgeBaseAnswer, QnaMetadata, QnaPair, EDITORIAL_SOURCE, NO_MATCH_QNA_ID,
    METADATA_ACTIVITY_REFERENCE_ID, METADATA_CONVERSATION_ID, METADATA_CREATED_AT,
    METADATA_CREATED_BY, METADATA_UPDATED_AT, METADATA_UPDATED_BY,
};
pub use provider::QuestionAnswerProvider;

#[cfg(test)]
pub use provider::MockQuestionAnswerProvider;
