//! API layer - Bot Framework endpoint, probes and middleware

pub mod health;
pub mod messages;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router;
pub use state::{AppState, QnaServiceTrait};
