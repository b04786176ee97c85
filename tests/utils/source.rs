/// Scripted page source for fetcher tests
///
/// Each employer id maps to a list of page sizes. Requests past the end of
/// the list return an empty page.
use async_trait::async_trait;
use hh_vacancies_lib::modules::provider::{PageRequest, VacancyPageSource};
use hh_vacancies_lib::modules::vacancies::{SalaryRange, Vacancy};
use hh_vacancies_lib::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct EmployerScript {
    pub pages: Vec<usize>,
    /// Page index that fails with a server error
    pub fail_at: Option<u32>,
    pub panics: bool,
}

#[derive(Default)]
pub struct ScriptedSource {
    scripts: HashMap<String, EmployerScript>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn pages(mut self, employer_id: &str, pages: Vec<usize>) -> Self {
        self.scripts.insert(
            employer_id.to_string(),
            EmployerScript {
                pages,
                ..Default::default()
            },
        );
        self
    }

    pub fn failing(mut self, employer_id: &str, pages: Vec<usize>, fail_at: u32) -> Self {
        self.scripts.insert(
            employer_id.to_string(),
            EmployerScript {
                pages,
                fail_at: Some(fail_at),
                panics: false,
            },
        );
        self
    }

    pub fn panicking(mut self, employer_id: &str) -> Self {
        self.scripts.insert(
            employer_id.to_string(),
            EmployerScript {
                panics: true,
                ..Default::default()
            },
        );
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn respond(&self, request: &PageRequest) -> AppResult<Vec<Vacancy>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let key = request.employer_id.clone().unwrap_or_default();
        let script = self.scripts.get(&key).cloned().unwrap_or_default();

        if script.panics {
            panic!("scripted panic for employer {}", key);
        }
        if script.fail_at == Some(request.page) {
            return Err(AppError::ExternalServiceError(
                "hh.ru service unavailable (503 Service Unavailable)".to_string(),
            ));
        }

        let size = script.pages.get(request.page as usize).copied().unwrap_or(0);
        Ok((0..size)
            .map(|i| vacancy(&key, request.page, i))
            .collect())
    }
}

#[async_trait]
impl VacancyPageSource for ScriptedSource {
    async fn fetch_page(&self, request: &PageRequest) -> AppResult<Vec<Vacancy>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let guard = InFlightGuard(&self.in_flight);
        let result = self.respond(request).await;
        drop(guard);
        result
    }
}

/// Decrements the in-flight counter even when the request panics
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn vacancy(employer_id: &str, page: u32, index: usize) -> Vacancy {
    Vacancy {
        title: format!("Engineer {}-{}", page, index),
        salary: SalaryRange::new(Some(100_000 + index as i32), None),
        url: Some(format!("https://hh.ru/vacancy/{}{}{:03}", employer_id, page, index)),
        company: format!("Employer {}", employer_id),
        area: Some("Moscow".to_string()),
    }
}
