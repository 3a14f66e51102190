use crate::domain::bot::TaskModuleResponse;
use crate::domain::search::RetrievedContext;

/// Result of answering a user question
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// Completion generated from the retrieved context
    Answered {
        answer: String,
        context: RetrievedContext,
    },
    /// Search failed and the completion was generated without context
    SearchUnavailable { answer: String },
    /// The knowledge base is empty or has never been published
    NotPublished,
}

impl AnswerOutcome {
    /// Generated answer text, `None` when no answer was produced
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Answered { answer, .. } | Self::SearchUnavailable { answer } => Some(answer),
            Self::NotPublished => None,
        }
    }

    /// Metric label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Answered {
                context: RetrievedContext::Snippet(_),
                ..
            } => "answered",
            Self::Answered { .. } => "answered_without_context",
            Self::SearchUnavailable { .. } => "search_unavailable",
            Self::NotPublished => "not_published",
        }
    }
}

/// Result of an add or edit form submission
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The pair was written and the chat card refreshed
    Saved,
    /// No stored pair matched the original question exactly; nothing written
    NotSaved,
    /// Form re-rendered with inline validation errors
    Invalid(TaskModuleResponse),
    /// Form re-rendered because the question already exists
    DuplicateQuestion(TaskModuleResponse),
    /// Card preview shown inside the task module
    Preview(TaskModuleResponse),
}

impl EditOutcome {
    /// Response for the task module; `None` closes it
    pub fn into_task_module_response(self) -> Option<TaskModuleResponse> {
        match self {
            Self::Saved | Self::NotSaved => None,
            Self::Invalid(response)
            | Self::DuplicateQuestion(response)
            | Self::Preview(response) => Some(response),
        }
    }

    /// Metric label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::NotSaved => "not_saved",
            Self::Invalid(_) => "invalid",
            Self::DuplicateQuestion(_) => "duplicate_question",
            Self::Preview(_) => "preview",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_accessor() {
        let outcome = AnswerOutcome::Answered {
            answer: "VPN ...".to_string(),
            context: RetrievedContext::NoMatch,
        };
        assert_eq!(outcome.answer(), Some("VPN ..."));
        assert_eq!(outcome.label(), "answered_without_context");

        assert_eq!(AnswerOutcome::NotPublished.answer(), None);
    }

    #[test]
    fn test_saved_closes_task_module() {
        assert!(EditOutcome::Saved.into_task_module_response().is_none());
        assert!(EditOutcome::NotSaved.into_task_module_response().is_none());
        assert!(
            EditOutcome::Invalid(TaskModuleResponse::message("invalid"))
                .into_task_module_response()
                .is_some()
        );
    }
}
