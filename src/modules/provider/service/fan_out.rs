use super::paginated_fetcher::{FetchNotice, FetchOutcome, PaginatedFetcher};
use crate::modules::vacancies::domain::{aggregates::VacancyAggregator, EmployerRef, VacancyMap};
use crate::shared::errors::AppError;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_info, log_warn};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

/// Width of the worker pool: at most this many employers are fetched at once
pub const MAX_CONCURRENT_FETCHES: usize = 10;

/// A company whose fetch task failed outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyFailure {
    pub company: String,
    pub reason: String,
}

/// Joined result of a fan-out pass
#[derive(Debug, Clone, Default)]
pub struct FanOutReport {
    /// Companies with at least one vacancy; empty results are left out
    pub vacancies: VacancyMap,
    pub notices: Vec<FetchNotice>,
    pub failures: Vec<CompanyFailure>,
    pub elapsed: Duration,
}

impl FanOutReport {
    pub fn total_vacancies(&self) -> usize {
        VacancyAggregator::total(&self.vacancies)
    }
}

/// Runs the paginated fetch for many employers on a bounded pool and merges
/// the results once every task has finished.
pub struct FanOutAggregator {
    fetcher: Arc<PaginatedFetcher>,
    concurrency: usize,
}

impl FanOutAggregator {
    pub fn new(fetcher: Arc<PaginatedFetcher>) -> Self {
        Self::with_concurrency(fetcher, MAX_CONCURRENT_FETCHES)
    }

    pub fn with_concurrency(fetcher: Arc<PaginatedFetcher>, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetch every company concurrently. Each fetch runs in its own task, so
    /// a panic in one is reported as that company's failure and its siblings
    /// keep running. Returns only after all tasks have completed.
    pub async fn fetch_all(&self, companies: &[EmployerRef], pages_per_company: u32) -> FanOutReport {
        let timer = TimedOperation::new("fetch_all_companies");

        let results = stream::iter(companies.iter().cloned().map(|company| {
            let fetcher = Arc::clone(&self.fetcher);
            async move {
                let employer_id = company.id.clone();
                let task = tokio::spawn(async move {
                    fetcher.fetch(Some(employer_id.as_str()), pages_per_company).await
                });
                (company, task.await)
            }
        }))
        .buffer_unordered(self.concurrency)
        .collect::<Vec<_>>()
        .await;

        let mut report = FanOutReport::default();
        for (company, result) in results {
            match result {
                Ok(outcome) => Self::merge_outcome(&mut report, &company, outcome),
                Err(join_error) => {
                    let err = AppError::from(join_error);
                    LogContext::error_with_context(
                        &err,
                        &format!("Failed to fetch vacancies for '{}'", company.name),
                    );
                    report.failures.push(CompanyFailure {
                        company: company.name,
                        reason: err.to_string(),
                    });
                }
            }
        }

        report.elapsed = timer.elapsed();
        timer.finish_with_info(&format!(
            "{} vacancies from {} of {} companies",
            report.total_vacancies(),
            report.vacancies.len(),
            companies.len()
        ));
        log_info!(
            "Execution time: {:.2} seconds",
            report.elapsed.as_secs_f64()
        );

        report
    }

    /// Fetch the global listing and group it by each vacancy's employer name
    pub async fn fetch_unscoped(&self, pages: u32) -> FanOutReport {
        let timer = TimedOperation::new("fetch_unscoped_listing");
        let outcome = self.fetcher.fetch(None, pages).await;

        let report = FanOutReport {
            vacancies: VacancyAggregator::group_by_company(outcome.vacancies),
            notices: outcome.notice.into_iter().collect(),
            failures: Vec::new(),
            elapsed: timer.elapsed(),
        };

        timer.finish_with_info(&format!(
            "{} vacancies from {} companies",
            report.total_vacancies(),
            report.vacancies.len()
        ));
        log_info!(
            "Execution time: {:.2} seconds",
            report.elapsed.as_secs_f64()
        );

        report
    }

    fn merge_outcome(report: &mut FanOutReport, company: &EmployerRef, outcome: FetchOutcome) {
        if let Some(mut notice) = outcome.notice {
            log_warn!(
                "Vacancies for '{}' are incomplete: {}",
                company.name,
                notice.reason
            );
            notice.employer = company.name.clone();
            report.notices.push(notice);
        }

        if outcome.vacancies.is_empty() {
            return;
        }

        report
            .vacancies
            .entry(company.name.clone())
            .or_default()
            .extend(outcome.vacancies);
    }
}
