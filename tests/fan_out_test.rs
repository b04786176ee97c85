/// Fan-out fetch tests
///
/// Tests cover:
/// - Failure isolation between companies (errors and panics)
/// - Omission of companies without vacancies
/// - The concurrency bound and wall-clock behaviour of the pool
mod utils;

use hh_vacancies_lib::modules::provider::{
    FanOutAggregator, PaginatedFetcher, MAX_CONCURRENT_FETCHES,
};
use hh_vacancies_lib::modules::vacancies::EmployerRef;
use std::sync::Arc;
use std::time::Duration;
use utils::source::ScriptedSource;

fn employer(id: &str) -> EmployerRef {
    EmployerRef::new(id, format!("Company {}", id))
}

fn aggregator(source: Arc<ScriptedSource>) -> FanOutAggregator {
    FanOutAggregator::new(Arc::new(PaginatedFetcher::new(source)))
}

#[tokio::test]
async fn failing_company_does_not_affect_others() {
    let source = Arc::new(
        ScriptedSource::new()
            .pages("a", vec![100, 30])
            .failing("b", vec![100, 100], 1)
            .pages("c", vec![5]),
    );

    let report = aggregator(source)
        .fetch_all(&[employer("a"), employer("b"), employer("c")], 5)
        .await;

    assert_eq!(report.vacancies["Company a"].len(), 130);
    assert_eq!(report.vacancies["Company b"].len(), 100);
    assert_eq!(report.vacancies["Company c"].len(), 5);
    assert_eq!(report.total_vacancies(), 235);

    assert_eq!(report.notices.len(), 1);
    assert_eq!(report.notices[0].employer, "Company b");
    assert_eq!(report.notices[0].page, 1);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn companies_without_vacancies_are_omitted() {
    let source = Arc::new(ScriptedSource::new().pages("a", vec![3]).pages("empty", vec![]));

    let report = aggregator(source)
        .fetch_all(&[employer("a"), employer("empty")], 5)
        .await;

    assert_eq!(report.vacancies.len(), 1);
    assert!(report.vacancies.contains_key("Company a"));
    assert!(!report.vacancies.contains_key("Company empty"));
}

#[tokio::test]
async fn panicking_fetch_is_reported_as_failure() {
    let source = Arc::new(
        ScriptedSource::new()
            .pages("a", vec![10])
            .panicking("boom")
            .pages("c", vec![20]),
    );

    let report = aggregator(source)
        .fetch_all(&[employer("a"), employer("boom"), employer("c")], 5)
        .await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].company, "Company boom");
    assert_eq!(report.vacancies["Company a"].len(), 10);
    assert_eq!(report.vacancies["Company c"].len(), 20);
}

#[tokio::test]
async fn in_flight_fetches_never_exceed_pool_width() {
    let source = Arc::new(ScriptedSource::new().with_delay(Duration::from_millis(50)));
    let companies: Vec<EmployerRef> = (0..25).map(|i| employer(&i.to_string())).collect();

    aggregator(Arc::clone(&source)).fetch_all(&companies, 1).await;

    assert_eq!(source.request_count(), 25);
    assert!(source.max_in_flight() <= MAX_CONCURRENT_FETCHES);
    assert!(source.max_in_flight() > 1);
}

#[tokio::test]
async fn pool_of_one_fetches_sequentially() {
    let source = Arc::new(ScriptedSource::new().with_delay(Duration::from_millis(10)));
    let companies: Vec<EmployerRef> = (0..5).map(|i| employer(&i.to_string())).collect();

    let fetcher = Arc::new(PaginatedFetcher::new(source.clone()));
    FanOutAggregator::with_concurrency(fetcher, 1)
        .fetch_all(&companies, 1)
        .await;

    assert_eq!(source.max_in_flight(), 1);
}

#[tokio::test]
async fn concurrent_fetch_is_faster_than_sequential() {
    let delay = Duration::from_millis(200);
    let source = Arc::new(ScriptedSource::new().with_delay(delay));
    let companies: Vec<EmployerRef> = (0..10).map(|i| employer(&i.to_string())).collect();

    let report = aggregator(source).fetch_all(&companies, 1).await;

    // Ten sequential requests would take two seconds
    assert!(report.elapsed < delay * 5, "took {:?}", report.elapsed);
}

#[tokio::test]
async fn unscoped_listing_is_grouped_by_vacancy_company() {
    let source = Arc::new(ScriptedSource::new().pages("", vec![100, 20]));

    let report = aggregator(source).fetch_unscoped(3).await;

    assert_eq!(report.total_vacancies(), 120);
    assert!(report.notices.is_empty());
    assert!(report
        .vacancies
        .iter()
        .all(|(company, list)| list.iter().all(|v| &v.company == company)));
}

#[tokio::test]
async fn empty_company_list_returns_empty_report() {
    let report = aggregator(Arc::new(ScriptedSource::new())).fetch_all(&[], 5).await;

    assert!(report.vacancies.is_empty());
    assert!(report.failures.is_empty());
}
