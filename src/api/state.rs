//! Application state for shared services

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::domain::{
    Activity, AnswerOutcome, DomainError, EditOutcome, QnaForm, TaskModuleResponse,
};
use crate::infrastructure::services::QnaPairService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub qna_service: Arc<dyn QnaServiceTrait>,
}

/// Operations the activity endpoint needs from the Q&A façade
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait QnaServiceTrait: Send + Sync {
    /// Answer a message and reply into its conversation
    async fn reply(&self, activity: &Activity) -> Result<AnswerOutcome, DomainError>;
    async fn edit(&self, form: QnaForm, activity: &Activity) -> Result<EditOutcome, DomainError>;
    async fn add(&self, form: QnaForm, activity: &Activity) -> Result<EditOutcome, DomainError>;
    /// Edit form opened from a card's edit action
    fn fetch_form(&self, form: QnaForm) -> TaskModuleResponse;
}

#[async_trait::async_trait]
impl QnaServiceTrait for QnaPairService {
    async fn reply(&self, activity: &Activity) -> Result<AnswerOutcome, DomainError> {
        self.get_reply_to_qna(activity).await
    }

    async fn edit(&self, form: QnaForm, activity: &Activity) -> Result<EditOutcome, DomainError> {
        self.edit_qna_pair(form, activity).await
    }

    async fn add(&self, form: QnaForm, activity: &Activity) -> Result<EditOutcome, DomainError> {
        self.add_qna_pair(form, activity).await
    }

    fn fetch_form(&self, form: QnaForm) -> TaskModuleResponse {
        self.edit_form(form)
    }
}

impl AppState {
    pub fn new(qna_service: Arc<dyn QnaServiceTrait>) -> Self {
        Self { qna_service }
    }
}
