//! Bot Connector REST client

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::bot::ResourceResponse;
use crate::domain::{Activity, ConversationReference, DomainError, MessagingTransport};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_TOKEN_ENDPOINT: &str =
    "https://login.microsoftonline.com/botframework.com/oauth2/v2.0/token";
pub const DEFAULT_SCOPE: &str = "https://api.botframework.com/.default";

/// Tokens are refreshed this long before they expire
const EXPIRY_MARGIN_SECS: i64 = 300;

/// Bot registration credentials
#[derive(Debug, Clone)]
pub struct BotConnectorConfig {
    pub app_id: String,
    pub app_password: String,
    pub token_endpoint: String,
    pub scope: String,
}

impl BotConnectorConfig {
    pub fn new(app_id: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_password: app_password.into(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Posts and updates activities through the Bot Connector service
#[derive(Debug)]
pub struct BotConnectorClient<C: HttpClientTrait> {
    client: C,
    config: BotConnectorConfig,
    token: RwLock<Option<CachedToken>>,
}

impl<C: HttpClientTrait> BotConnectorClient<C> {
    pub fn new(client: C, config: BotConnectorConfig) -> Self {
        Self {
            client,
            config,
            token: RwLock::new(None),
        }
    }

    fn activities_url(conversation: &ConversationReference) -> String {
        format!(
            "{}/v3/conversations/{}/activities",
            conversation.service_url.trim_end_matches('/'),
            conversation.conversation.id
        )
    }

    async fn access_token(&self) -> Result<String, DomainError> {
        let now = Utc::now();

        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.access_token.clone());
            }
        }

        let mut slot = self.token.write().await;

        // Another task may have refreshed while we waited
        if let Some(token) = slot.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.access_token.clone());
            }
        }

        debug!("Requesting bot connector token");

        let response = self
            .client
            .post_form(
                &self.config.token_endpoint,
                vec![
                    ("grant_type", "client_credentials"),
                    ("client_id", self.config.app_id.as_str()),
                    ("client_secret", self.config.app_password.as_str()),
                    ("scope", self.config.scope.as_str()),
                ],
            )
            .await
            .map_err(|e| DomainError::provider("bot_connector", format!("Token request failed: {}", e)))?;

        let token: TokenResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::provider("bot_connector", format!("Failed to parse token: {}", e))
        })?;

        info!(expires_in = token.expires_in, "Acquired bot connector token");

        let access_token = token.access_token.clone();
        *slot = Some(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        });

        Ok(access_token)
    }
}

#[async_trait]
impl<C: HttpClientTrait> MessagingTransport for BotConnectorClient<C> {
    async fn send_activity(
        &self,
        conversation: &ConversationReference,
        mut activity: Activity,
    ) -> Result<ResourceResponse, DomainError> {
        activity.conversation = conversation.conversation.clone();

        let token = self.access_token().await?;
        let authorization = format!("Bearer {}", token);
        let body = serde_json::to_value(&activity)
            .map_err(|e| DomainError::internal(format!("Failed to serialize activity: {}", e)))?;

        let response = self
            .client
            .post_json(
                &Self::activities_url(conversation),
                vec![("Authorization", authorization.as_str())],
                &body,
            )
            .await?;

        if response.is_null() {
            return Ok(ResourceResponse::default());
        }

        serde_json::from_value(response).map_err(|e| {
            DomainError::provider("bot_connector", format!("Failed to parse resource: {}", e))
        })
    }

    async fn update_activity(
        &self,
        conversation: &ConversationReference,
        mut activity: Activity,
    ) -> Result<(), DomainError> {
        let activity_id = activity
            .id
            .clone()
            .ok_or_else(|| DomainError::validation("Activity update requires an id"))?;
        activity.conversation = conversation.conversation.clone();

        let token = self.access_token().await?;
        let authorization = format!("Bearer {}", token);
        let body = serde_json::to_value(&activity)
            .map_err(|e| DomainError::internal(format!("Failed to serialize activity: {}", e)))?;

        let url = format!("{}/{}", Self::activities_url(conversation), activity_id);

        self.client
            .put_json(&url, vec![("Authorization", authorization.as_str())], &body)
            .await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bot::{ConversationAccount, ADAPTIVE_CARD_CONTENT_TYPE};
    use crate::domain::Attachment;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const SERVICE_URL: &str = "https://smba.trafficmanager.net/emea/";

    fn conversation() -> ConversationReference {
        ConversationReference {
            service_url: SERVICE_URL.to_string(),
            conversation: ConversationAccount {
                id: "a:conv-1".to_string(),
                ..Default::default()
            },
        }
    }

    fn client_with_token() -> MockHttpClient {
        MockHttpClient::new().with_response(
            "POST",
            DEFAULT_TOKEN_ENDPOINT,
            serde_json::json!({ "token_type": "Bearer", "expires_in": 3600, "access_token": "tok" }),
        )
    }

    fn card() -> Attachment {
        Attachment::adaptive_card(serde_json::json!({ "type": "AdaptiveCard" }))
    }

    #[tokio::test]
    async fn test_send_activity_returns_resource_id() {
        let client = client_with_token().with_response(
            "POST",
            "https://smba.trafficmanager.net/emea/v3/conversations/a:conv-1/activities",
            serde_json::json!({ "id": "1:activity" }),
        );
        let connector = BotConnectorClient::new(client, BotConnectorConfig::new("app", "secret"));

        let resource = connector
            .send_activity(&conversation(), Activity::message_with_attachment(card()))
            .await
            .unwrap();

        assert_eq!(resource.id, "1:activity");

        let requests = connector.client.requests();
        assert_eq!(requests[0].url, DEFAULT_TOKEN_ENDPOINT);
        let body = requests[1].body.clone().unwrap();
        assert_eq!(body["type"], "message");
        assert_eq!(body["attachments"][0]["contentType"], ADAPTIVE_CARD_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn test_token_is_cached() {
        let client = client_with_token().with_response(
            "POST",
            "https://smba.trafficmanager.net/emea/v3/conversations/a:conv-1/activities",
            serde_json::json!({ "id": "x" }),
        );
        let connector = BotConnectorClient::new(client, BotConnectorConfig::new("app", "secret"));

        for _ in 0..2 {
            connector
                .send_activity(&conversation(), Activity::message_with_attachment(card()))
                .await
                .unwrap();
        }

        let token_requests = connector
            .client
            .requests()
            .iter()
            .filter(|r| r.url == DEFAULT_TOKEN_ENDPOINT)
            .count();
        assert_eq!(token_requests, 1);
    }

    #[tokio::test]
    async fn test_update_activity_puts_to_activity_url() {
        let client = client_with_token().with_response(
            "PUT",
            "https://smba.trafficmanager.net/emea/v3/conversations/a:conv-1/activities/1:activity",
            serde_json::Value::Null,
        );
        let connector = BotConnectorClient::new(client, BotConnectorConfig::new("app", "secret"));

        let update = Activity::card_update("1:activity", conversation().conversation, card());
        connector.update_activity(&conversation(), update).await.unwrap();

        let put = connector.client.requests().pop().unwrap();
        assert_eq!(put.method, "PUT");
        assert_eq!(put.body.unwrap()["id"], "1:activity");
    }

    #[tokio::test]
    async fn test_update_without_id_is_rejected() {
        let connector =
            BotConnectorClient::new(client_with_token(), BotConnectorConfig::new("app", "secret"));

        let error = connector
            .update_activity(&conversation(), Activity::message_with_attachment(card()))
            .await
            .unwrap_err();

        assert!(matches!(error, DomainError::Validation { .. }));
    }
}
