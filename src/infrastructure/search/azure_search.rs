use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::search::QueryType;
use crate::domain::{DomainError, SearchDocument, SearchProvider, SearchQuery, SearchResponse};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_API_VERSION: &str = "2023-07-01-Preview";

/// Azure AI Search configuration
#[derive(Debug, Clone)]
pub struct AzureSearchConfig {
    /// Service name, the `{name}` in `https://{name}.search.windows.net`
    pub service_name: String,
    pub index_name: String,
    /// Query key
    pub api_key: String,
    pub api_version: String,
    /// Override for the service URL, mainly for tests and private endpoints
    pub endpoint: Option<String>,
}

impl AzureSearchConfig {
    pub fn new(
        service_name: impl Into<String>,
        index_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            index_name: index_name.into(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.search.windows.net", self.service_name),
        }
    }
}

/// Azure AI Search provider using the REST documents API
#[derive(Debug)]
pub struct AzureSearchProvider<C: HttpClientTrait> {
    client: C,
    config: AzureSearchConfig,
}

impl<C: HttpClientTrait> AzureSearchProvider<C> {
    pub fn new(client: C, config: AzureSearchConfig) -> Self {
        Self { client, config }
    }

    fn build_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.config.base_url(),
            self.config.index_name,
            self.config.api_version
        )
    }

    fn build_request(&self, query: &SearchQuery) -> serde_json::Value {
        let mut body = serde_json::json!({
            "search": query.text,
            "top": query.top,
        });

        if query.query_type == QueryType::Semantic {
            body["queryType"] = serde_json::json!("semantic");
            body["semanticConfiguration"] = serde_json::json!(query.semantic_configuration);
            body["queryLanguage"] = serde_json::json!(query.query_language);

            if query.extractive_captions {
                body["captions"] = serde_json::json!("extractive");
            }

            if let Some(count) = query.answer_count {
                body["answers"] = serde_json::json!(format!("extractive|count-{}", count));
            }
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("api-key", self.config.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<SearchResponse, DomainError> {
        let response: AzureSearchResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("azure_search", format!("Failed to parse response: {}", e))
        })?;

        let documents = response
            .value
            .into_iter()
            .map(|document| SearchDocument {
                content: document.content.unwrap_or_default(),
                score: document.score,
                reranker_score: document.reranker_score,
                captions: document
                    .captions
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|caption| caption.text)
                    .collect(),
            })
            .collect();

        Ok(SearchResponse::new(documents))
    }
}

#[async_trait]
impl<C: HttpClientTrait> SearchProvider for AzureSearchProvider<C> {
    async fn search(&self, query: SearchQuery) -> Result<SearchResponse, DomainError> {
        let url = self.build_url();
        let body = self.build_request(&query);

        debug!(index = %self.config.index_name, "Querying search index");

        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| DomainError::provider("azure_search", e.to_string()))?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "azure_search"
    }
}

#[derive(Debug, Deserialize)]
struct AzureSearchResponse {
    #[serde(default)]
    value: Vec<AzureSearchDocument>,
}

#[derive(Debug, Deserialize)]
struct AzureSearchDocument {
    content: Option<String>,
    #[serde(rename = "@search.score", default)]
    score: f64,
    #[serde(rename = "@search.rerankerScore")]
    reranker_score: Option<f64>,
    #[serde(rename = "@search.captions")]
    captions: Option<Vec<AzureCaption>>,
}

#[derive(Debug, Deserialize)]
struct AzureCaption {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RetrievedContext;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const URL: &str = "https://faq-search.search.windows.net/indexes/mergen-index/docs/search?api-version=2023-07-01-Preview";

    fn provider(client: MockHttpClient) -> AzureSearchProvider<MockHttpClient> {
        AzureSearchProvider::new(
            client,
            AzureSearchConfig::new("faq-search", "mergen-index", "query-key"),
        )
    }

    fn query() -> SearchQuery {
        SearchQuery::semantic("vpn nasıl kurulur?", "tr-TR", "mergenmarkdown-config")
    }

    #[tokio::test]
    async fn test_parses_reranker_scores() {
        let client = MockHttpClient::new().with_response(
            "POST",
            URL,
            serde_json::json!({
                "@odata.context": "ignored",
                "value": [
                    {
                        "@search.score": 12.5,
                        "@search.rerankerScore": 2.31,
                        "@search.captions": [{ "text": "VPN istemcisini indirin", "highlights": "" }],
                        "content": "VPN istemcisini indirin ve kurun."
                    },
                    {
                        "@search.score": 3.0,
                        "content": "Diğer"
                    }
                ]
            }),
        );

        let response = provider(client).search(query()).await.unwrap();

        assert_eq!(response.documents.len(), 2);
        let top = response.top().unwrap();
        assert_eq!(top.reranker_score, Some(2.31));
        assert_eq!(top.captions, vec!["VPN istemcisini indirin"]);
        assert_eq!(response.documents[1].reranker_score, None);

        assert_eq!(
            RetrievedContext::from_response(&response, 1.0),
            RetrievedContext::Snippet("VPN istemcisini indirin ve kurun.".to_string())
        );
    }

    #[tokio::test]
    async fn test_semantic_request_body() {
        let client = MockHttpClient::new()
            .with_response("POST", URL, serde_json::json!({ "value": [] }));
        let provider = provider(client);

        let response = provider.search(query()).await.unwrap();
        assert!(response.is_empty());

        let body = provider.client.requests()[0].body.clone().unwrap();
        assert_eq!(body["search"], "vpn nasıl kurulur?");
        assert_eq!(body["queryType"], "semantic");
        assert_eq!(body["semanticConfiguration"], "mergenmarkdown-config");
        assert_eq!(body["queryLanguage"], "tr-TR");
        assert_eq!(body["captions"], "extractive");
        assert_eq!(body["answers"], "extractive|count-10");
        assert_eq!(body["top"], 10);
    }

    #[tokio::test]
    async fn test_service_error_is_provider_error() {
        let client = MockHttpClient::new().with_error("POST", URL, "HTTP 503");

        let error = provider(client).search(query()).await.unwrap_err();
        assert!(matches!(error, DomainError::Provider { .. }));
    }

    #[test]
    fn test_endpoint_override() {
        let config = AzureSearchConfig::new("ignored", "idx", "key")
            .with_endpoint("http://localhost:8080/");
        let provider = AzureSearchProvider::new(MockHttpClient::new(), config);

        assert_eq!(
            provider.build_url(),
            "http://localhost:8080/indexes/idx/docs/search?api-version=2023-07-01-Preview"
        );
    }
}
