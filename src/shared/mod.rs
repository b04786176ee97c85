// Shared kernel used by every module

pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (database pool)
pub mod utils; // Shared utilities (logging)

// Re-exports for convenience
pub use infrastructure::database::Database;
