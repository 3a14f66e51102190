use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
///
/// Successful responses with an empty body yield `Value::Null`. HTTP 400
/// responses map to `DomainError::BadRequest`.
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError>;

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    async fn put_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    async fn patch_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    async fn post_form(
        &self,
        url: &str,
        form: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.request(method, url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        read_response(response).await
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_response(response: reqwest::Response) -> Result<serde_json::Value, DomainError> {
    let status = response.status();

    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        let message = format!("HTTP {}: {}", status, error_body);

        return Err(if status == StatusCode::BAD_REQUEST {
            DomainError::bad_request("http", message)
        } else {
            DomainError::provider("http", message)
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| DomainError::provider("http", format!("Failed to read response: {}", e)))?;

    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }

    serde_json::from_str(&text)
        .map_err(|e| DomainError::provider("http", format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError> {
        self.send(Method::GET, url, headers, None).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        self.send(Method::POST, url, headers, Some(body)).await
    }

    async fn put_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        self.send(Method::PUT, url, headers, Some(body)).await
    }

    async fn patch_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        self.send(Method::PATCH, url, headers, Some(body)).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError> {
        let response = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        read_response(response).await
    }
}
