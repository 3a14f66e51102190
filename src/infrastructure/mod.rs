//! Infrastructure layer - External service implementations

pub mod activity;
pub mod bot;
pub mod config;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod qna;
pub mod search;
pub mod services;
