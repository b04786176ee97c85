use crate::modules::vacancies::domain::{
    aggregates::VacancyAggregator, CompanyCount, Vacancy, VacancyCatalog, VacancyMap,
};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Catalog backed by the mapping produced by a fetch pass.
/// The known companies are exactly the keys of the mapping.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    vacancies: VacancyMap,
}

impl InMemoryCatalog {
    pub fn new(vacancies: VacancyMap) -> Self {
        Self { vacancies }
    }
}

#[async_trait]
impl VacancyCatalog for InMemoryCatalog {
    async fn list_vacancies(&self) -> AppResult<Vec<Vacancy>> {
        Ok(self.vacancies.values().flatten().cloned().collect())
    }

    async fn count_by_company(&self) -> AppResult<Vec<CompanyCount>> {
        Ok(VacancyAggregator::count_by_company(&self.vacancies))
    }

    async fn average_salary(&self) -> AppResult<Option<f64>> {
        Ok(VacancyAggregator::average_salary(&self.vacancies))
    }

    async fn search_by_keyword(&self, keyword: &str) -> AppResult<VacancyMap> {
        Ok(VacancyAggregator::search_by_keyword(&self.vacancies, keyword))
    }

    async fn above_salary(&self, threshold: f64) -> AppResult<Vec<Vacancy>> {
        Ok(VacancyAggregator::above_salary(&self.vacancies, threshold))
    }
}
