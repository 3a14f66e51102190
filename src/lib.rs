//! FAQ Plus bot
//!
//! Answers Teams questions from a curated knowledge base:
//! - Semantic search over the indexed answers, gated by re-ranker score
//! - Chat completion grounded on the retrieved snippet
//! - Adaptive card replies with edit and add workflows for the knowledge base

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::{CompletionSettings, KNOWLEDGE_BASE_ENTITY_ID};
use infrastructure::{
    activity::InMemoryActivityStorage,
    bot::{BotConnectorClient, BotConnectorConfig},
    config::InMemoryConfigurationDataProvider,
    http_client::HttpClient,
    llm::{AzureOpenAiConfig, AzureOpenAiProvider},
    qna::{LanguageServiceConfig, LanguageServiceProvider},
    search::{AzureSearchConfig, AzureSearchProvider},
    services::{QnaPairService, QnaPairServiceConfig, QnaPairServiceDeps},
};
use tracing::{info, warn};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = create_qna_service(config)?;
    Ok(AppState::new(service))
}

/// Wire the managed service clients into the Q&A façade
pub fn create_qna_service(config: &AppConfig) -> anyhow::Result<Arc<QnaPairService>> {
    let missing = config.missing_settings();
    if !missing.is_empty() {
        warn!(settings = ?missing, "Required settings are empty; calls to those services will fail");
    }

    let http = HttpClient::with_timeout(Duration::from_secs(config.bot.request_timeout_secs))?;

    let mut search_config = AzureSearchConfig::new(
        &config.search.service_name,
        &config.search.index_name,
        &config.search.query_key,
    );
    search_config.api_version = config.search.api_version.clone();
    if let Some(endpoint) = &config.search.endpoint {
        search_config = search_config.with_endpoint(endpoint);
    }

    let openai_config = AzureOpenAiConfig::new(&config.openai.endpoint, &config.openai.api_key)
        .with_api_version(&config.openai.api_version);

    let mut kb_config = LanguageServiceConfig::new(
        &config.knowledge_base.endpoint,
        &config.knowledge_base.api_key,
        &config.knowledge_base.project_name,
    );
    kb_config.api_version = config.knowledge_base.api_version.clone();

    let mut bot_config = BotConnectorConfig::new(&config.bot.app_id, &config.bot.app_password);
    bot_config.token_endpoint = config.bot.token_endpoint.clone();
    bot_config.scope = config.bot.scope.clone();

    let knowledge_base_id = config
        .knowledge_base
        .knowledge_base_id
        .clone()
        .unwrap_or_else(|| config.knowledge_base.project_name.clone());

    let deps = QnaPairServiceDeps {
        configuration: Arc::new(
            InMemoryConfigurationDataProvider::new()
                .with_entity(KNOWLEDGE_BASE_ENTITY_ID, knowledge_base_id),
        ),
        question_answer: Arc::new(LanguageServiceProvider::new(http.clone(), kb_config)),
        activity_storage: Arc::new(InMemoryActivityStorage::new()),
        search: Arc::new(AzureSearchProvider::new(http.clone(), search_config)),
        llm: Arc::new(AzureOpenAiProvider::new(http.clone(), openai_config)),
        transport: Arc::new(BotConnectorClient::new(http, bot_config)),
    };

    let service_config = QnaPairServiceConfig {
        app_base_uri: config.bot.app_base_uri.clone(),
        query_language: config.search.query_language.clone(),
        semantic_configuration: config.search.semantic_configuration.clone(),
        reranker_threshold: config.search.reranker_threshold,
        completion: CompletionSettings {
            deployment_id: config.openai.deployment_id.clone(),
            system_prompt: config.openai.system_prompt.clone(),
            max_tokens: config.openai.max_tokens,
            temperature: config.openai.temperature,
        },
    };

    info!(
        index = %config.search.index_name,
        deployment = %config.openai.deployment_id,
        project = %config.knowledge_base.project_name,
        "Q&A service initialized"
    );

    Ok(Arc::new(QnaPairService::new(deps, service_config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_with_defaults() {
        assert!(create_app_state(&AppConfig::default()).await.is_ok());
    }
}
