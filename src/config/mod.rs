//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, BotConfig, KnowledgeBaseConfig, LogFormat, LoggingConfig, OpenAiConfig,
    SearchConfig, ServerConfig,
};
