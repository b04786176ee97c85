/// Storage and query seams for the vacancy context
///
/// `VacancyRepository` covers writes; `VacancyCatalog` covers the read-side
/// aggregates the console offers. The in-memory and PostgreSQL catalogs must
/// agree on the semantics documented here.
use super::entities::{CompanyCount, CompanyId, NewCompany, NewVacancy, Vacancy, VacancyMap};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancyRepository: Send + Sync {
    /// Create the tables if they do not exist yet
    async fn setup_tables(&self) -> AppResult<()>;

    /// Insert the company unless its name exists; return the stored id either way.
    /// Existing attributes are never modified.
    async fn upsert_company(&self, company: &NewCompany) -> AppResult<CompanyId>;

    /// Look up a company id by name
    async fn get_company_id(&self, name: &str) -> AppResult<Option<CompanyId>>;

    /// Insert vacancies, silently skipping any whose URL is already stored.
    /// Returns the number of rows actually inserted.
    async fn insert_vacancies_bulk(&self, records: &[NewVacancy]) -> AppResult<usize>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancyCatalog: Send + Sync {
    /// Every vacancy with its company name
    async fn list_vacancies(&self) -> AppResult<Vec<Vacancy>>;

    /// Vacancy count for every known company, zero counts included
    async fn count_by_company(&self) -> AppResult<Vec<CompanyCount>>;

    /// Mean representative salary; `None` when no vacancy has any bound
    async fn average_salary(&self) -> AppResult<Option<f64>>;

    /// Case-insensitive title search grouped by company. Every known company
    /// appears, with an empty list when nothing matched.
    async fn search_by_keyword(&self, keyword: &str) -> AppResult<VacancyMap>;

    /// Vacancies whose representative salary is strictly above `threshold`
    async fn above_salary(&self, threshold: f64) -> AppResult<Vec<Vacancy>>;
}
