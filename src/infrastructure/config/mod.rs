//! Saved configuration entity storage

mod in_memory;

pub use in_memory::InMemoryConfigurationDataProvider;
