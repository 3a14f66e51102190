use std::fmt::Debug;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{AnswerQuery, KnowledgeBaseAnswer, QnaPair};
use crate::domain::DomainError;

/// Trait for the managed question answering service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuestionAnswerProvider: Send + Sync + Debug {
    /// Best matching answers for a question, highest confidence first
    async fn generate_answer(
        &self,
        query: AnswerQuery,
    ) -> Result<Vec<KnowledgeBaseAnswer>, DomainError>;

    /// Replace an existing pair, matched by its identifier
    async fn update_qna(&self, pair: QnaPair) -> Result<(), DomainError>;

    /// Create a new pair
    async fn add_qna(&self, pair: QnaPair) -> Result<(), DomainError>;

    /// Whether the exact question (case-insensitive) is stored in the
    /// production or test knowledge base
    async fn question_exists(&self, question: &str) -> Result<bool, DomainError>;

    /// Whether the knowledge base has been published at least once
    async fn initial_published_status(
        &self,
        knowledge_base_id: &str,
    ) -> Result<bool, DomainError>;
}
