use super::{dto::HhVacancyPage, mapper::HhMapper};
use crate::config::ApiConfig;
use crate::modules::provider::traits::{PageRequest, VacancyPageSource};
use crate::modules::vacancies::domain::Vacancy;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

const PROVIDER_NAME: &str = "hh.ru";

/// Client for the hh.ru vacancy listing. No retries: a failed request is
/// reported to the caller as-is.
pub struct HhClient {
    client: Client,
    base_url: String,
}

impl HhClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn vacancies_url(&self) -> String {
        format!("{}/vacancies", self.base_url)
    }

    /// Query parameters; `employer_id` is omitted for the unscoped listing
    pub fn query_params(request: &PageRequest) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(employer_id) = &request.employer_id {
            params.push(("employer_id", employer_id.clone()));
        }
        params.push(("per_page", request.per_page.to_string()));
        params.push(("page", request.page.to_string()));
        params
    }

    /// Handle HTTP response status codes
    pub fn handle_response_status(status: StatusCode) -> AppResult<()> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimitError(format!(
                "{} rate limit exceeded",
                PROVIDER_NAME
            ))),
            StatusCode::NOT_FOUND => Err(AppError::NotFound("Resource not found".to_string())),
            StatusCode::BAD_REQUEST => Err(AppError::ApiError(format!(
                "Bad request to {} API",
                PROVIDER_NAME
            ))),
            StatusCode::FORBIDDEN => Err(AppError::ApiError(format!(
                "Access forbidden to {} API",
                PROVIDER_NAME
            ))),
            s if s.is_server_error() => Err(AppError::ExternalServiceError(format!(
                "{} service unavailable ({})",
                PROVIDER_NAME, s
            ))),
            _ => Err(AppError::ApiError(format!(
                "Unexpected status code from {}: {}",
                PROVIDER_NAME, status
            ))),
        }
    }
}

#[async_trait]
impl VacancyPageSource for HhClient {
    async fn fetch_page(&self, request: &PageRequest) -> AppResult<Vec<Vacancy>> {
        let endpoint = format!("vacancies[{} p{}]", request.scope(), request.page);
        LogContext::api_call(PROVIDER_NAME, &endpoint, "started", None);
        let start = Instant::now();

        let response = self
            .client
            .get(self.vacancies_url())
            .query(&Self::query_params(request))
            .send()
            .await?;

        let status = response.status();
        LogContext::api_call(
            PROVIDER_NAME,
            &endpoint,
            status.as_str(),
            Some(start.elapsed().as_millis() as u64),
        );
        Self::handle_response_status(status)?;

        let page = response.json::<HhVacancyPage>().await.map_err(|e| {
            AppError::SerializationError(format!("Failed to parse {} response: {}", PROVIDER_NAME, e))
        })?;

        Ok(page.items.into_iter().map(HhMapper::to_domain).collect())
    }
}
