//! Card state echoed between conversation turns

use serde::{Deserialize, Serialize};

use super::validation::QnaFormValidationError;

/// A previously answered pair, used for follow-up prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousQuestion {
    pub qna_id: i64,
    #[serde(default)]
    pub questions: Vec<String>,
}

/// Data attached to the actions of an answer card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseCardPayload {
    pub user_question: Option<String>,
    pub knowledge_base_answer: Option<String>,
    pub previous_questions: Vec<PreviousQuestion>,
}

/// Inline validation messages shown on the question form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValidation {
    pub question: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub redirection_url: Option<String>,
}

impl FormValidation {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Question form submitted from the add/edit task module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QnaForm {
    /// Question as stored before the edit, empty when adding
    pub original_question: Option<String>,
    pub updated_question: Option<String>,
    /// Answer text
    pub description: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub redirection_url: Option<String>,
    pub is_rich_card: bool,
    pub is_preview_card: bool,
    pub is_test_knowledge_base: bool,
    pub validation: FormValidation,
}

impl QnaForm {
    pub fn original_question(&self) -> &str {
        self.original_question.as_deref().unwrap_or_default()
    }

    pub fn updated_question(&self) -> &str {
        self.updated_question.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Whether the form edits an existing pair rather than adding one
    pub fn is_edit(&self) -> bool {
        !self.original_question().trim().is_empty()
    }

    /// Updated question equals the original, ignoring case and surrounding
    /// whitespace
    pub fn is_question_unchanged(&self) -> bool {
        self.updated_question().trim().to_uppercase()
            == self.original_question().trim().to_uppercase()
    }

    /// Whether any rich card field is filled in
    pub fn has_rich_content(&self) -> bool {
        [&self.title, &self.subtitle, &self.image_url, &self.redirection_url]
            .iter()
            .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    /// Form copy with the messages of `errors` shown inline
    pub fn with_errors(mut self, errors: &[QnaFormValidationError]) -> Self {
        for error in errors {
            let message = Some(error.to_string());
            match error {
                QnaFormValidationError::EmptyQuestion
                | QnaFormValidationError::DuplicateQuestion
                | QnaFormValidationError::ContainsHtml { field: "question" } => {
                    self.validation.question = message
                }
                QnaFormValidationError::EmptyAnswer
                | QnaFormValidationError::ContainsHtml { field: "description" } => {
                    self.validation.description = message
                }
                QnaFormValidationError::ContainsHtml { field: "title" } => {
                    self.validation.title = message
                }
                QnaFormValidationError::ContainsHtml { field: "subtitle" } => {
                    self.validation.subtitle = message
                }
                QnaFormValidationError::ContainsHtml { .. } => self.validation.question = message,
                QnaFormValidationError::InvalidImageUrl => self.validation.image_url = message,
                QnaFormValidationError::InvalidRedirectionUrl => {
                    self.validation.redirection_url = message
                }
            }
        }

        self
    }

    /// Answer text to store for this form
    ///
    /// Rich cards store their fields as a JSON document; normal cards store
    /// the trimmed description.
    pub fn combined_description(&self) -> String {
        if !self.has_rich_content() {
            return self.description().trim().to_string();
        }

        let rich = RichAnswer {
            title: trimmed(&self.title),
            subtitle: trimmed(&self.subtitle),
            image_url: trimmed(&self.image_url),
            redirection_url: trimmed(&self.redirection_url),
            description: self.description().trim().to_string(),
        };

        serde_json::to_string(&rich).unwrap_or_else(|_| rich.description.clone())
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

/// Stored representation of a rich card answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RichAnswer {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub redirection_url: String,
    pub description: String,
}

impl RichAnswer {
    /// Parse a stored answer, `None` when it is plain text
    pub fn parse(answer: &str) -> Option<Self> {
        let trimmed = answer.trim();
        if !trimmed.starts_with('{') {
            return None;
        }

        serde_json::from_str(trimmed).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(original: &str, updated: &str) -> QnaForm {
        QnaForm {
            original_question: Some(original.to_string()),
            updated_question: Some(updated.to_string()),
            description: Some("Use the self service portal.".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unchanged_question_ignores_case_and_whitespace() {
        let form = form("How do I reset my password?", "  how do i reset my password? ");
        assert!(form.is_question_unchanged());
        assert!(form.is_edit());
    }

    #[test]
    fn test_changed_question() {
        let form = form("How do I reset my password?", "How do I change my password?");
        assert!(!form.is_question_unchanged());
    }

    #[test]
    fn test_deserialize_submitted_form() {
        let form: QnaForm = serde_json::from_value(json!({
            "msteams": { "type": "task/submit" },
            "originalQuestion": "What is VPN?",
            "updatedQuestion": "What is a VPN?",
            "description": "Virtual private network",
            "imageUrl": "",
            "isTestKnowledgeBase": true
        }))
        .unwrap();

        assert_eq!(form.updated_question(), "What is a VPN?");
        assert!(form.is_test_knowledge_base);
        assert!(!form.has_rich_content());
        assert!(form.validation.is_empty());
    }

    #[test]
    fn test_plain_combined_description() {
        let mut form = form("q", "q");
        form.description = Some("  answer  ".to_string());

        assert_eq!(form.combined_description(), "answer");
    }

    #[test]
    fn test_rich_combined_description_round_trips() {
        let mut form = form("q", "q");
        form.title = Some(" VPN ".to_string());
        form.image_url = Some("https://contoso.com/vpn.png".to_string());

        let stored = form.combined_description();
        let rich = RichAnswer::parse(&stored).unwrap();

        assert_eq!(rich.title, "VPN");
        assert_eq!(rich.image_url, "https://contoso.com/vpn.png");
        assert_eq!(rich.description, "Use the self service portal.");
        assert!(RichAnswer::parse("plain answer").is_none());
    }

    #[test]
    fn test_with_errors_sets_inline_messages() {
        let form = form("q", "").with_errors(&[
            QnaFormValidationError::EmptyQuestion,
            QnaFormValidationError::InvalidImageUrl,
        ]);

        assert!(form.validation.question.is_some());
        assert!(form.validation.image_url.is_some());
        assert!(form.validation.description.is_none());
    }

    #[test]
    fn test_duplicate_error_is_shown_on_question() {
        let form = form("q", "other").with_errors(&[QnaFormValidationError::DuplicateQuestion]);
        assert_eq!(
            form.validation.question,
            Some(QnaFormValidationError::DuplicateQuestion.to_string())
        );
    }
}
