pub mod catalog;
pub mod ingestion_service;

pub use catalog::InMemoryCatalog;
pub use ingestion_service::{IngestionService, IngestionSummary};
