/// Vacancy storage and aggregate queries
///
/// Architecture:
/// - Domain: entities, salary rules, aggregate queries and storage traits
/// - Application: in-memory catalog and the ingest pass
/// - Infrastructure: Diesel-based PostgreSQL repository
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use application::{InMemoryCatalog, IngestionService, IngestionSummary};
pub use domain::{
    aggregates::VacancyAggregator, CompanyCount, CompanyId, EmployerRef, NewCompany,
    NewVacancy, SalaryRange, Vacancy, VacancyCatalog, VacancyMap, VacancyRepository,
};
pub use infrastructure::VacancyRepositoryImpl;
