use crate::modules::vacancies::domain::{
    NewCompany, NewVacancy, Vacancy, VacancyMap, VacancyRepository,
};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_debug, log_info};
use std::sync::Arc;

/// Outcome of one ingest pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionSummary {
    pub companies: usize,
    pub inserted: usize,
    /// Vacancies whose URL was already stored
    pub skipped: usize,
    pub failed_companies: Vec<String>,
}

/// Persists a fetched mapping company by company.
///
/// Each company is upserted before its vacancy batch is written, and every
/// company commits on its own: a failure leaves earlier companies stored and
/// never produces a vacancy without its company.
pub struct IngestionService {
    repository: Arc<dyn VacancyRepository>,
}

impl IngestionService {
    pub fn new(repository: Arc<dyn VacancyRepository>) -> Self {
        Self { repository }
    }

    pub async fn ingest(&self, vacancies: &VacancyMap) -> IngestionSummary {
        let timer = TimedOperation::new("ingest_vacancies");
        let mut summary = IngestionSummary::default();

        for (company, list) in vacancies {
            match self.ingest_company(company, list).await {
                Ok(inserted) => {
                    summary.companies += 1;
                    summary.inserted += inserted;
                    summary.skipped += list.len().saturating_sub(inserted);
                }
                Err(e) => {
                    LogContext::error_with_context(
                        &e,
                        &format!("Failed to store vacancies for '{}'", company),
                    );
                    summary.failed_companies.push(company.clone());
                }
            }
        }

        timer.finish_with_info(&format!(
            "{} companies, {} inserted, {} already stored",
            summary.companies, summary.inserted, summary.skipped
        ));
        summary
    }

    async fn ingest_company(&self, company: &str, list: &[Vacancy]) -> AppResult<usize> {
        let new_company = NewCompany {
            name: company.to_string(),
            industry: None,
            area: list.iter().find_map(|v| v.area.clone()),
        };
        let company_id = self.repository.upsert_company(&new_company).await?;

        let records: Vec<NewVacancy> = list
            .iter()
            .map(|vacancy| NewVacancy::from_vacancy(company_id, vacancy))
            .collect();
        let inserted = self.repository.insert_vacancies_bulk(&records).await?;

        log_debug!(
            "Stored {}/{} vacancies for '{}' (id {})",
            inserted,
            records.len(),
            company,
            company_id
        );
        if inserted < records.len() {
            log_info!(
                "Skipped {} already stored vacancies for '{}'",
                records.len() - inserted,
                company
            );
        }

        Ok(inserted)
    }
}
