/// Shared infrastructure concerns
///
/// Infrastructure implementations that are shared across modules.
pub mod database;

// Re-exports for convenience
pub use database::{Database, DbConnection, DbPool};
