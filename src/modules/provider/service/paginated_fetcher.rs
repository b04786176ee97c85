use crate::modules::provider::traits::{PageRequest, VacancyPageSource};
use crate::modules::vacancies::domain::Vacancy;
use crate::shared::utils::logger::LogContext;
use crate::log_debug;
use std::sync::Arc;

/// Fixed page size; a shorter page marks the last one
pub const PAGE_SIZE: u32 = 100;

/// Non-fatal report that an employer's pages were cut short by a failed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchNotice {
    pub employer: String,
    pub page: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub vacancies: Vec<Vacancy>,
    pub pages_fetched: u32,
    /// Set when a page request failed; `vacancies` then holds the earlier pages
    pub notice: Option<FetchNotice>,
}

/// Walks the listing pages of one employer (or the unscoped listing) in order
pub struct PaginatedFetcher {
    source: Arc<dyn VacancyPageSource>,
}

impl PaginatedFetcher {
    pub fn new(source: Arc<dyn VacancyPageSource>) -> Self {
        Self { source }
    }

    /// Request pages `0..max_pages`, stopping after the first short page or
    /// the first failed request. Never retries.
    pub async fn fetch(&self, employer_id: Option<&str>, max_pages: u32) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();

        for page in 0..max_pages {
            let request = PageRequest::new(employer_id, page, PAGE_SIZE);

            match self.source.fetch_page(&request).await {
                Ok(items) => {
                    let received = items.len();
                    outcome.vacancies.extend(items);
                    outcome.pages_fetched += 1;

                    if received < PAGE_SIZE as usize {
                        log_debug!(
                            "Last page for {} reached at page {} ({} items)",
                            request.scope(),
                            page,
                            received
                        );
                        break;
                    }
                }
                Err(e) => {
                    let reason = e.to_string();
                    LogContext::fetch_notice(
                        request.scope(),
                        page,
                        outcome.vacancies.len(),
                        &reason,
                    );
                    outcome.notice = Some(FetchNotice {
                        employer: request.scope().to_string(),
                        page,
                        reason,
                    });
                    break;
                }
            }
        }

        outcome
    }
}
