//! Mapping from knowledge base pairs to the chat messages that display them

mod entity;
mod repository;

pub use entity::ActivityEntity;
pub use repository::ActivityStorage;

#[cfg(test)]
pub use repository::MockActivityStorage;
