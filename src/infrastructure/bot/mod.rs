//! Chat channel transport implementations

mod connector;

pub use connector::{BotConnectorClient, BotConnectorConfig, DEFAULT_SCOPE, DEFAULT_TOKEN_ENDPOINT};
