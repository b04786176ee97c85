use crate::modules::vacancies::domain::Vacancy;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// One page of the vacancy listing, optionally scoped to an employer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub employer_id: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(employer_id: Option<&str>, page: u32, per_page: u32) -> Self {
        Self {
            employer_id: employer_id.map(str::to_string),
            page,
            per_page,
        }
    }

    /// Label used in logs and notices
    pub fn scope(&self) -> &str {
        self.employer_id.as_deref().unwrap_or("<all employers>")
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancyPageSource: Send + Sync {
    /// Fetch a single page. A non-success response is an error; a short page
    /// is a normal result.
    async fn fetch_page(&self, request: &PageRequest) -> AppResult<Vec<Vacancy>>;
}
