//! Sent message reference storage

mod in_memory;

pub use in_memory::InMemoryActivityStorage;
