//! Question/answer pair entities

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier the service returns when no stored pair matched
pub const NO_MATCH_QNA_ID: i64 = -1;

pub const METADATA_CREATED_BY: &str = "createdby";
pub const METADATA_CREATED_AT: &str = "createdat";
pub const METADATA_UPDATED_BY: &str = "updatedby";
pub const METADATA_UPDATED_AT: &str = "updatedat";
pub const METADATA_CONVERSATION_ID: &str = "conversationid";
pub const METADATA_ACTIVITY_REFERENCE_ID: &str = "activityreferenceid";

/// Metadata key/value pairs stored with a pair
pub type QnaMetadata = BTreeMap<String, String>;

/// Parameters for a knowledge base lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerQuery {
    pub question: String,
    /// Query the test (unpublished) knowledge base instead of production
    pub is_test_knowledge_base: bool,
    /// Number of answers to return
    pub top: u32,
}

impl AnswerQuery {
    pub fn new(question: impl Into<String>, is_test_knowledge_base: bool) -> Self {
        Self {
            question: question.into(),
            is_test_knowledge_base,
            top: 1,
        }
    }
}

/// An answer returned by the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseAnswer {
    pub id: Option<i64>,
    pub questions: Vec<String>,
    pub answer: String,
    pub confidence_score: f64,
    pub source: Option<String>,
    pub metadata: QnaMetadata,
    /// Answer is only reachable as a follow-up prompt
    pub is_context_only: bool,
}

impl KnowledgeBaseAnswer {
    pub fn new(id: i64, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            questions: vec![question.into()],
            answer: answer.into(),
            confidence_score: 1.0,
            source: None,
            metadata: QnaMetadata::new(),
            is_context_only: false,
        }
    }

    /// The "no good match" answer produced by the service
    pub fn no_match(default_answer: impl Into<String>) -> Self {
        Self {
            id: Some(NO_MATCH_QNA_ID),
            questions: Vec::new(),
            answer: default_answer.into(),
            confidence_score: 0.0,
            source: None,
            metadata: QnaMetadata::new(),
            is_context_only: false,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Identifier of a stored pair; `None` for the no-match answer
    pub fn valid_id(&self) -> Option<i64> {
        self.id.filter(|id| *id != NO_MATCH_QNA_ID)
    }

    pub fn first_question(&self) -> Option<&str> {
        self.questions.first().map(String::as_str)
    }

    /// Whether the first stored question equals `question`, ignoring case
    pub fn is_same_question(&self, question: &str) -> bool {
        self.first_question()
            .is_some_and(|stored| stored.to_uppercase() == question.to_uppercase())
    }

    /// Reference to the chat message that displays this pair
    pub fn activity_reference_id(&self) -> Option<&str> {
        self.metadata
            .get(METADATA_ACTIVITY_REFERENCE_ID)
            .map(String::as_str)
    }
}

/// A pair as written to the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QnaPair {
    /// `None` when creating a new pair
    pub id: Option<i64>,
    pub questions: Vec<String>,
    pub answer: String,
    pub source: String,
    pub metadata: QnaMetadata,
}

/// Source label for pairs written through the bot
pub const EDITORIAL_SOURCE: &str = "Editorial";

impl QnaPair {
    /// A new pair with creation attribution metadata
    pub fn created(
        question: impl Into<String>,
        answer: impl Into<String>,
        created_by: &str,
        conversation_id: &str,
        activity_reference_id: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let mut metadata = QnaMetadata::new();
        metadata.insert(METADATA_CREATED_BY.to_string(), created_by.to_string());
        metadata.insert(
            METADATA_CREATED_AT.to_string(),
            now.timestamp_millis().to_string(),
        );
        metadata.insert(
            METADATA_CONVERSATION_ID.to_string(),
            conversation_id.to_string(),
        );
        metadata.insert(
            METADATA_ACTIVITY_REFERENCE_ID.to_string(),
            activity_reference_id.to_string(),
        );

        Self {
            id: None,
            questions: vec![question.into()],
            answer: answer.into(),
            source: EDITORIAL_SOURCE.to_string(),
            metadata,
        }
    }

    /// The replacement for a stored pair after an edit
    ///
    /// Existing metadata is kept and the edit attribution is upserted.
    /// Alternate phrasings stay in place; only the question matching
    /// `original_question` is swapped when the question text changed.
    pub fn edited(
        existing: &KnowledgeBaseAnswer,
        id: i64,
        answer: impl Into<String>,
        updated_by: &str,
        updated_question: &str,
        original_question: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let updated = updated_question.trim();
        let question_changed = !updated.is_empty() && !same_question(updated, original_question);

        let mut questions = if existing.questions.is_empty() {
            vec![original_question.to_string()]
        } else {
            existing.questions.clone()
        };

        if question_changed {
            match questions
                .iter_mut()
                .find(|stored| same_question(stored, original_question))
            {
                Some(stored) => *stored = updated.to_string(),
                None => questions.insert(0, updated.to_string()),
            }
        }

        let mut metadata = existing.metadata.clone();
        metadata.insert(METADATA_UPDATED_BY.to_string(), updated_by.to_string());
        metadata.insert(
            METADATA_UPDATED_AT.to_string(),
            now.timestamp_millis().to_string(),
        );

        Self {
            id: Some(id),
            questions,
            answer: answer.into(),
            source: EDITORIAL_SOURCE.to_string(),
            metadata,
        }
    }
}

fn same_question(a: &str, b: &str) -> bool {
    a.trim().to_uppercase() == b.trim().to_uppercase()
}
