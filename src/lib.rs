pub mod config;
pub mod modules;
mod schema;
pub mod shared;

pub use config::{ApiConfig, AppConfig, DatabaseConfig};
pub use modules::{
    console::ConsoleMenu,
    provider::{FanOutAggregator, FanOutReport, HhClient, PaginatedFetcher, VacancyPageSource},
    vacancies::{
        InMemoryCatalog, IngestionService, IngestionSummary, VacancyCatalog, VacancyMap,
        VacancyRepository, VacancyRepositoryImpl,
    },
};
pub use shared::errors::{AppError, AppResult};
pub use shared::Database;
