//! Infrastructure services

mod qna_pair_service;

pub use qna_pair_service::{QnaPairService, QnaPairServiceConfig, QnaPairServiceDeps};
