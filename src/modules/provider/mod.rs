/// Vacancy source integration
///
/// - `traits`: the page-source seam the fetchers depend on
/// - `infrastructure`: hh.ru HTTP client, DTOs and mapper
/// - `service`: paginated fetch for one employer and the bounded fan-out
pub mod infrastructure;
pub mod service;
pub mod traits;

pub use infrastructure::HhClient;
pub use service::{
    CompanyFailure, FanOutAggregator, FanOutReport, FetchNotice, FetchOutcome, PaginatedFetcher,
    MAX_CONCURRENT_FETCHES, PAGE_SIZE,
};
pub use traits::{PageRequest, VacancyPageSource};
