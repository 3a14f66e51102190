use serde::Deserialize;

use crate::infrastructure::observability::MetricsConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Azure AI Search settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub service_name: String,
    pub index_name: String,
    pub query_key: String,
    pub api_version: String,
    /// Overrides `https://{service_name}.search.windows.net`
    pub endpoint: Option<String>,
    pub query_language: String,
    pub semantic_configuration: String,
    pub reranker_threshold: f64,
}

/// Azure OpenAI settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment_id: String,
    pub api_version: String,
    /// Persona instruction sent ahead of every question
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Language service question answering settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    pub endpoint: String,
    pub api_key: String,
    pub project_name: String,
    pub api_version: String,
    /// Knowledge base id saved at startup, defaults to the project name
    pub knowledge_base_id: Option<String>,
}

/// Bot registration settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub app_base_uri: String,
    pub app_id: String,
    pub app_password: String,
    pub token_endpoint: String,
    pub scope: String,
    /// Timeout for outgoing HTTP calls, in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3978,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            index_name: String::new(),
            query_key: String::new(),
            api_version: "2023-07-01-Preview".to_string(),
            endpoint: None,
            query_language: "tr-TR".to_string(),
            semantic_configuration: "mergenmarkdown-config".to_string(),
            reranker_threshold: 1.0,
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment_id: String::new(),
            api_version: "2024-02-01".to_string(),
            system_prompt: String::new(),
            max_tokens: 800,
            temperature: 0.7,
        }
    }
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            project_name: String::new(),
            api_version: "2021-10-01".to_string(),
            knowledge_base_id: None,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            app_base_uri: String::new(),
            app_id: String::new(),
            app_password: String::new(),
            token_endpoint: "https://login.microsoftonline.com/botframework.com/oauth2/v2.0/token"
                .to_string(),
            scope: "https://api.botframework.com/.default".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Names of required settings that are empty
    pub fn missing_settings(&self) -> Vec<&'static str> {
        [
            ("search.service_name", self.search.service_name.is_empty() && self.search.endpoint.is_none()),
            ("search.index_name", self.search.index_name.is_empty()),
            ("search.query_key", self.search.query_key.is_empty()),
            ("openai.endpoint", self.openai.endpoint.is_empty()),
            ("openai.api_key", self.openai.api_key.is_empty()),
            ("openai.deployment_id", self.openai.deployment_id.is_empty()),
            ("knowledge_base.endpoint", self.knowledge_base.endpoint.is_empty()),
            ("knowledge_base.api_key", self.knowledge_base.api_key.is_empty()),
            ("knowledge_base.project_name", self.knowledge_base.project_name.is_empty()),
        ]
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 3978);
        assert_eq!(config.search.query_language, "tr-TR");
        assert_eq!(config.search.semantic_configuration, "mergenmarkdown-config");
        assert_eq!(config.search.reranker_threshold, 1.0);
        assert_eq!(config.openai.max_tokens, 800);
        assert_eq!(config.openai.temperature, 0.7);
        assert_eq!(config.knowledge_base.api_version, "2021-10-01");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "search": { "service_name": "faq-search", "index_name": "idx" },
            "openai": { "max_tokens": 400 }
        }))
        .unwrap();

        assert_eq!(config.search.service_name, "faq-search");
        assert_eq!(config.search.api_version, "2023-07-01-Preview");
        assert_eq!(config.openai.max_tokens, 400);
        assert_eq!(config.openai.temperature, 0.7);
        assert!(matches!(config.logging.format, LogFormat::Pretty));
    }

    #[test]
    fn test_missing_settings() {
        let missing = AppConfig::default().missing_settings();

        assert!(missing.contains(&"openai.api_key"));
        assert!(missing.contains(&"knowledge_base.project_name"));
    }
}
