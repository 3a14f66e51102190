//! Knowledge base provider implementations

mod language_service;

pub use language_service::{LanguageServiceConfig, LanguageServiceProvider};
