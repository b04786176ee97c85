pub mod fan_out;
pub mod paginated_fetcher;

pub use fan_out::{CompanyFailure, FanOutAggregator, FanOutReport, MAX_CONCURRENT_FETCHES};
pub use paginated_fetcher::{FetchNotice, FetchOutcome, PaginatedFetcher, PAGE_SIZE};
