use serde::{Deserialize, Serialize};

/// Default number of documents returned per query
pub const DEFAULT_RESULT_COUNT: u32 = 10;

/// Default number of extractive answers requested per query
pub const DEFAULT_ANSWER_COUNT: u32 = 10;

/// How the index interprets the query text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Simple,
    #[default]
    Semantic,
}

/// Search parameters for a semantic index query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query text
    pub text: String,
    pub query_type: QueryType,
    /// Language of the query text (e.g. `tr-TR`)
    pub query_language: String,
    /// Name of the semantic configuration defined on the index
    pub semantic_configuration: String,
    /// Request extractive captions for each document
    pub extractive_captions: bool,
    /// Number of extractive answers to request, `None` disables answers
    pub answer_count: Option<u32>,
    /// Number of documents to return
    pub top: u32,
}

impl SearchQuery {
    /// Create a semantic query with extractive captions and answers enabled
    pub fn semantic(
        text: impl Into<String>,
        query_language: impl Into<String>,
        semantic_configuration: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            query_type: QueryType::Semantic,
            query_language: query_language.into(),
            semantic_configuration: semantic_configuration.into(),
            extractive_captions: true,
            answer_count: Some(DEFAULT_ANSWER_COUNT),
            top: DEFAULT_RESULT_COUNT,
        }
    }

    /// Set number of results
    pub fn with_top(mut self, top: u32) -> Self {
        self.top = top;
        self
    }

    /// Set the number of extractive answers
    pub fn with_answer_count(mut self, count: Option<u32>) -> Self {
        self.answer_count = count;
        self
    }
}
