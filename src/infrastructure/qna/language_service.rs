use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::qna::QnaMetadata;
use crate::domain::{
    AnswerQuery, DomainError, KnowledgeBaseAnswer, QnaPair, QuestionAnswerProvider,
};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_API_VERSION: &str = "2021-10-01";

const PRODUCTION_DEPLOYMENT: &str = "production";
const TEST_DEPLOYMENT: &str = "test";

/// Azure AI Language question answering configuration
#[derive(Debug, Clone)]
pub struct LanguageServiceConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Question answering project that holds the knowledge base
    pub project_name: String,
    pub api_version: String,
}

impl LanguageServiceConfig {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            project_name: project_name.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

/// Knowledge base backed by the Language service question answering API
#[derive(Debug)]
pub struct LanguageServiceProvider<C: HttpClientTrait> {
    client: C,
    config: LanguageServiceConfig,
}

impl<C: HttpClientTrait> LanguageServiceProvider<C> {
    pub fn new(client: C, config: LanguageServiceConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> &str {
        self.config.endpoint.trim_end_matches('/')
    }

    fn query_url(&self, deployment: &str) -> String {
        format!(
            "{}/language/:query-knowledgebases?projectName={}&deploymentName={}&api-version={}",
            self.endpoint(),
            self.config.project_name,
            deployment,
            self.config.api_version
        )
    }

    fn qnas_url(&self) -> String {
        format!(
            "{}/language/query-knowledgebases/projects/{}/qnas?api-version={}",
            self.endpoint(),
            self.config.project_name,
            self.config.api_version
        )
    }

    fn deployments_url(&self, project_name: &str) -> String {
        format!(
            "{}/language/query-knowledgebases/projects/{}/deployments?api-version={}",
            self.endpoint(),
            project_name,
            self.config.api_version
        )
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Ocp-Apim-Subscription-Key", self.config.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_query(&self, query: &AnswerQuery) -> serde_json::Value {
        serde_json::json!({
            "question": query.question,
            "top": query.top,
        })
    }

    async fn query(
        &self,
        query: &AnswerQuery,
        deployment: &str,
    ) -> Result<Vec<KnowledgeBaseAnswer>, DomainError> {
        let url = self.query_url(deployment);
        let body = self.build_query(query);

        let response = self.client.post_json(&url, self.headers(), &body).await?;

        let response: QueryResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::knowledge_base(format!("Failed to parse answers: {}", e))
        })?;

        Ok(response.answers.into_iter().map(Into::into).collect())
    }

    async fn patch(&self, op: &'static str, pair: QnaPair) -> Result<(), DomainError> {
        let body = serde_json::json!([{
            "op": op,
            "value": QnaRecord::from(pair),
        }]);

        self.client
            .patch_json(&self.qnas_url(), self.headers(), &body)
            .await?;

        Ok(())
    }

    async fn exists_in(&self, question: &str, deployment: &str) -> Result<bool, DomainError> {
        let query = AnswerQuery::new(question, deployment == TEST_DEPLOYMENT);

        match self.query(&query, deployment).await {
            Ok(answers) => Ok(answers
                .first()
                .is_some_and(|answer| answer.is_same_question(question))),
            // Unpublished deployments reject queries
            Err(e) if e.is_bad_request() => {
                debug!(deployment = %deployment, "Deployment not queryable: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> QuestionAnswerProvider for LanguageServiceProvider<C> {
    async fn generate_answer(
        &self,
        query: AnswerQuery,
    ) -> Result<Vec<KnowledgeBaseAnswer>, DomainError> {
        let deployment = if query.is_test_knowledge_base {
            TEST_DEPLOYMENT
        } else {
            PRODUCTION_DEPLOYMENT
        };

        self.query(&query, deployment).await
    }

    async fn update_qna(&self, pair: QnaPair) -> Result<(), DomainError> {
        if pair.id.is_none() {
            return Err(DomainError::validation("Cannot update a pair without an id"));
        }

        self.patch("replace", pair).await
    }

    async fn add_qna(&self, pair: QnaPair) -> Result<(), DomainError> {
        self.patch("add", pair).await
    }

    async fn question_exists(&self, question: &str) -> Result<bool, DomainError> {
        if self.exists_in(question, PRODUCTION_DEPLOYMENT).await? {
            return Ok(true);
        }

        self.exists_in(question, TEST_DEPLOYMENT).await
    }

    async fn initial_published_status(
        &self,
        knowledge_base_id: &str,
    ) -> Result<bool, DomainError> {
        let project_name = if knowledge_base_id.trim().is_empty() {
            warn!("No stored knowledge base id, using the configured project");
            self.config.project_name.as_str()
        } else {
            knowledge_base_id
        };

        let response = self
            .client
            .get_json(&self.deployments_url(project_name), self.headers())
            .await?;

        let deployments: DeploymentsResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::knowledge_base(format!("Failed to parse deployments: {}", e))
        })?;

        Ok(deployments
            .value
            .iter()
            .any(|deployment| deployment.deployment_name.eq_ignore_ascii_case(PRODUCTION_DEPLOYMENT)))
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    answers: Vec<AnswerRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerRecord {
    id: Option<i64>,
    #[serde(default)]
    questions: Vec<String>,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    confidence_score: f64,
    source: Option<String>,
    #[serde(default)]
    metadata: QnaMetadata,
    dialog: Option<DialogRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DialogRecord {
    #[serde(default)]
    is_context_only: bool,
}

impl From<AnswerRecord> for KnowledgeBaseAnswer {
    fn from(record: AnswerRecord) -> Self {
        Self {
            id: record.id,
            questions: record.questions,
            answer: record.answer,
            confidence_score: record.confidence_score,
            source: record.source,
            metadata: record.metadata,
            is_context_only: record.dialog.is_some_and(|dialog| dialog.is_context_only),
        }
    }
}

#[derive(Debug, Serialize)]
struct QnaRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    answer: String,
    source: String,
    questions: Vec<String>,
    metadata: QnaMetadata,
}

impl From<QnaPair> for QnaRecord {
    fn from(pair: QnaPair) -> Self {
        Self {
            id: pair.id,
            answer: pair.answer,
            source: pair.source,
            questions: pair.questions,
            metadata: pair.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeploymentsResponse {
    #[serde(default)]
    value: Vec<DeploymentRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentRecord {
    deployment_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::qna::{METADATA_ACTIVITY_REFERENCE_ID, METADATA_UPDATED_BY};
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use chrono::Utc;

    const ENDPOINT: &str = "https://faq-language.cognitiveservices.azure.com";

    fn query_url(deployment: &str) -> String {
        format!(
            "{}/language/:query-knowledgebases?projectName=faq&deploymentName={}&api-version=2021-10-01",
            ENDPOINT, deployment
        )
    }

    fn qnas_url() -> String {
        format!(
            "{}/language/query-knowledgebases/projects/faq/qnas?api-version=2021-10-01",
            ENDPOINT
        )
    }

    fn provider(client: MockHttpClient) -> LanguageServiceProvider<MockHttpClient> {
        LanguageServiceProvider::new(
            client,
            LanguageServiceConfig::new(ENDPOINT, "language-key", "faq"),
        )
    }

    fn answers(question: &str) -> serde_json::Value {
        serde_json::json!({
            "answers": [{
                "id": 42,
                "questions": [question],
                "answer": "Use the self-service portal.",
                "confidenceScore": 0.93,
                "source": "Editorial",
                "metadata": { "activityreferenceid": "ref-1" },
                "dialog": { "isContextOnly": false, "prompts": [] }
            }]
        })
    }

    #[tokio::test]
    async fn test_generate_answer_maps_fields() {
        let client = MockHttpClient::new().with_response(
            "POST",
            query_url("production"),
            answers("How do I reset my password?"),
        );

        let result = provider(client)
            .generate_answer(AnswerQuery::new("how do i reset my password?", false))
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].valid_id(), Some(42));
        assert_eq!(result[0].activity_reference_id(), Some("ref-1"));
        assert!(!result[0].is_context_only);
    }

    #[tokio::test]
    async fn test_update_sends_replace_operation() {
        let client = MockHttpClient::new().with_response("PATCH", qnas_url(), serde_json::Value::Null);
        let provider = provider(client);

        let existing = KnowledgeBaseAnswer::new(42, "q", "Old answer");
        let pair = QnaPair::edited(&existing, 42, "New answer", "editor", "q", "q", Utc::now());
        provider.update_qna(pair).await.unwrap();

        let body = provider.client.requests()[0].body.clone().unwrap();
        assert_eq!(body[0]["op"], "replace");
        assert_eq!(body[0]["value"]["id"], 42);
        assert_eq!(body[0]["value"]["metadata"][METADATA_UPDATED_BY], "editor");
    }

    #[tokio::test]
    async fn test_add_sends_add_operation_without_id() {
        let client = MockHttpClient::new().with_response("PATCH", qnas_url(), serde_json::Value::Null);
        let provider = provider(client);

        let pair = QnaPair::created("q", "a", "creator", "conv-1", "ref-9", Utc::now());
        provider.add_qna(pair).await.unwrap();

        let body = provider.client.requests()[0].body.clone().unwrap();
        assert_eq!(body[0]["op"], "add");
        assert!(body[0]["value"].get("id").is_none());
        assert_eq!(body[0]["value"]["metadata"][METADATA_ACTIVITY_REFERENCE_ID], "ref-9");
    }

    #[tokio::test]
    async fn test_question_exists_falls_back_to_test() {
        let client = MockHttpClient::new()
            .with_bad_request("POST", query_url("production"), "not deployed")
            .with_response("POST", query_url("test"), answers("What is VPN?"));

        assert!(provider(client).question_exists("what is vpn?").await.unwrap());
    }

    #[tokio::test]
    async fn test_question_exists_requires_exact_match() {
        let client = MockHttpClient::new()
            .with_response("POST", query_url("production"), answers("What is a VPN client?"))
            .with_response("POST", query_url("test"), serde_json::json!({ "answers": [] }));

        assert!(!provider(client).question_exists("What is VPN?").await.unwrap());
    }

    #[tokio::test]
    async fn test_initial_published_status() {
        let url = format!(
            "{}/language/query-knowledgebases/projects/kb-1/deployments?api-version=2021-10-01",
            ENDPOINT
        );
        let client = MockHttpClient::new().with_response(
            "GET",
            url,
            serde_json::json!({ "value": [{ "deploymentName": "production" }] }),
        );

        assert!(provider(client).initial_published_status("kb-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_unpublished_when_no_production_deployment() {
        let url = format!(
            "{}/language/query-knowledgebases/projects/faq/deployments?api-version=2021-10-01",
            ENDPOINT
        );
        let client =
            MockHttpClient::new().with_response("GET", url, serde_json::json!({ "value": [] }));

        assert!(!provider(client).initial_published_status("").await.unwrap());
    }
}
