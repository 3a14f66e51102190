use serde::{Deserialize, Serialize};

/// A ranked document returned by the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Document content text
    pub content: String,
    /// Lexical relevance score
    pub score: f64,
    /// Score assigned by the semantic re-ranker, absent for non-semantic queries
    pub reranker_score: Option<f64>,
    /// Extractive captions highlighted by the service
    pub captions: Vec<String>,
}

impl SearchDocument {
    pub fn new(content: impl Into<String>, score: f64) -> Self {
        Self {
            content: content.into(),
            score,
            reranker_score: None,
            captions: Vec::new(),
        }
    }

    pub fn with_reranker_score(mut self, score: f64) -> Self {
        self.reranker_score = Some(score);
        self
    }
}

/// Documents returned for one query, in service ranking order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub documents: Vec<SearchDocument>,
}

impl SearchResponse {
    pub fn new(documents: Vec<SearchDocument>) -> Self {
        Self { documents }
    }

    /// The highest ranked document
    pub fn top(&self) -> Option<&SearchDocument> {
        self.documents.first()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Context extracted from a search for prompt assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievedContext {
    /// Top snippet passed the re-ranker threshold
    Snippet(String),
    /// No document, or the top document scored below the threshold
    NoMatch,
    /// The search call failed
    Unavailable,
}

impl RetrievedContext {
    /// Gate the top document of a response on its re-ranker score
    ///
    /// A missing re-ranker score counts as below the threshold.
    pub fn from_response(response: &SearchResponse, reranker_threshold: f64) -> Self {
        match response.top() {
            Some(document) => match document.reranker_score {
                Some(score) if score >= reranker_threshold => {
                    Self::Snippet(document.content.clone())
                }
                _ => Self::NoMatch,
            },
            None => Self::NoMatch,
        }
    }

    /// Context text for the prompt, empty unless a snippet was found
    pub fn text(&self) -> &str {
        match self {
            Self::Snippet(text) => text,
            Self::NoMatch | Self::Unavailable => "",
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_top(score: Option<f64>) -> SearchResponse {
        let mut top = SearchDocument::new("VPN bağlantısı için ...", 3.2);
        if let Some(score) = score {
            top = top.with_reranker_score(score);
        }

        SearchResponse::new(vec![
            top,
            SearchDocument::new("second", 1.1).with_reranker_score(2.9),
        ])
    }

    #[test]
    fn test_context_below_threshold_is_empty() {
        let context = RetrievedContext::from_response(&response_with_top(Some(0.4)), 1.0);

        assert_eq!(context, RetrievedContext::NoMatch);
        assert_eq!(context.text(), "");
    }

    #[test]
    fn test_context_at_threshold_uses_top_snippet() {
        let context = RetrievedContext::from_response(&response_with_top(Some(1.0)), 1.0);

        assert_eq!(context.text(), "VPN bağlantısı için ...");
    }

    #[test]
    fn test_context_only_considers_top_document() {
        // The second document scores higher but is ranked below the first
        let context = RetrievedContext::from_response(&response_with_top(Some(0.2)), 1.0);

        assert_eq!(context, RetrievedContext::NoMatch);
    }

    #[test]
    fn test_missing_reranker_score_is_no_match() {
        let context = RetrievedContext::from_response(&response_with_top(None), 1.0);
        assert_eq!(context, RetrievedContext::NoMatch);
    }

    #[test]
    fn test_empty_response_is_no_match() {
        let context = RetrievedContext::from_response(&SearchResponse::default(), 1.0);
        assert_eq!(context, RetrievedContext::NoMatch);
    }

    #[test]
    fn test_unavailable_has_empty_text() {
        assert_eq!(RetrievedContext::Unavailable.text(), "");
        assert!(RetrievedContext::Unavailable.is_unavailable());
    }
}
