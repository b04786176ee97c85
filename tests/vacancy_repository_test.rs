/// Vacancy repository tests - database operations
///
/// Tests cover:
/// - Idempotent company upserts and vacancy inserts
/// - Agreement between SQL aggregates and the in-memory catalog
///
/// Needs PostgreSQL: `TEST_DATABASE_URL=... cargo test -- --ignored`
mod utils;

use hh_vacancies_lib::modules::vacancies::{
    InMemoryCatalog, IngestionService, NewCompany, NewVacancy, SalaryRange, Vacancy,
    VacancyAggregator, VacancyCatalog, VacancyMap, VacancyRepository, VacancyRepositoryImpl,
};
use hh_vacancies_lib::shared::Database;
use std::sync::Arc;
use utils::db;

async fn prepared_repository() -> (Arc<Database>, VacancyRepositoryImpl) {
    let database = db::test_database();
    let repo = VacancyRepositoryImpl::new(Arc::clone(&database));
    repo.setup_tables().await.unwrap();
    db::clean_test_db(&database);
    (database, repo)
}

fn vacancy(company: &str, title: &str, from: Option<i32>, to: Option<i32>, url: Option<&str>) -> Vacancy {
    Vacancy {
        title: title.to_string(),
        salary: SalaryRange::new(from, to),
        url: url.map(str::to_string),
        company: company.to_string(),
        area: None,
    }
}

fn in_area(mut vacancy: Vacancy, area: &str) -> Vacancy {
    vacancy.area = Some(area.to_string());
    vacancy
}

fn sample_map() -> VacancyMap {
    VacancyAggregator::group_by_company(vec![
        in_area(
            vacancy("Yandex", "Backend Developer", Some(200_000), Some(300_000), Some("https://hh.ru/vacancy/1")),
            "Moscow",
        ),
        in_area(
            vacancy("Yandex", "Product Designer", None, None, Some("https://hh.ru/vacancy/2")),
            "Saint Petersburg",
        ),
        vacancy("Yandex", "Ведущий инженер", Some(250_000), None, Some("https://hh.ru/vacancy/6")),
        in_area(
            vacancy("Sber", "Data Engineer", Some(150_000), None, Some("https://hh.ru/vacancy/3")),
            "Kazan",
        ),
        in_area(
            vacancy("Sber", "Junior developer", None, Some(90_000), Some("https://hh.ru/vacancy/4")),
            "Moscow",
        ),
        in_area(vacancy("Avito", "QA Engineer", Some(0), None, Some("https://hh.ru/vacancy/5")), "Novosibirsk"),
    ])
}

#[tokio::test]
#[ignore = "needs PostgreSQL via TEST_DATABASE_URL"]
async fn upsert_company_twice_returns_same_id() {
    let _guard = db::acquire_test_lock();
    let (database, repo) = prepared_repository().await;

    let first = repo.upsert_company(&NewCompany::named("Yandex")).await.unwrap();
    let second = repo.upsert_company(&NewCompany::named("Yandex")).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(db::count_rows(&database, "companies"), 1);
    assert_eq!(repo.get_company_id("Yandex").await.unwrap(), Some(first));
}

#[tokio::test]
#[ignore = "needs PostgreSQL via TEST_DATABASE_URL"]
async fn unknown_company_has_no_id() {
    let _guard = db::acquire_test_lock();
    let (_database, repo) = prepared_repository().await;

    assert_eq!(repo.get_company_id("Nobody").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "needs PostgreSQL via TEST_DATABASE_URL"]
async fn bulk_insert_skips_known_urls() {
    let _guard = db::acquire_test_lock();
    let (database, repo) = prepared_repository().await;

    let company_id = repo.upsert_company(&NewCompany::named("Sber")).await.unwrap();
    let records: Vec<NewVacancy> = sample_map()["Sber"]
        .iter()
        .map(|v| NewVacancy::from_vacancy(company_id, v))
        .collect();

    assert_eq!(repo.insert_vacancies_bulk(&records).await.unwrap(), 2);
    assert_eq!(repo.insert_vacancies_bulk(&records).await.unwrap(), 0);
    assert_eq!(db::count_rows(&database, "vacancies"), 2);
}

#[tokio::test]
#[ignore = "needs PostgreSQL via TEST_DATABASE_URL"]
async fn vacancies_without_url_are_all_stored() {
    let _guard = db::acquire_test_lock();
    let (database, repo) = prepared_repository().await;

    let company_id = repo.upsert_company(&NewCompany::named("Avito")).await.unwrap();
    let records = vec![
        NewVacancy::from_vacancy(company_id, &vacancy("Avito", "Courier", None, None, None)),
        NewVacancy::from_vacancy(company_id, &vacancy("Avito", "Driver", None, None, None)),
    ];

    assert_eq!(repo.insert_vacancies_bulk(&records).await.unwrap(), 2);
    assert_eq!(db::count_rows(&database, "vacancies"), 2);
}

#[tokio::test]
#[ignore = "needs PostgreSQL via TEST_DATABASE_URL"]
async fn empty_insert_touches_nothing() {
    let _guard = db::acquire_test_lock();
    let (_database, repo) = prepared_repository().await;

    assert_eq!(repo.insert_vacancies_bulk(&[]).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "needs PostgreSQL via TEST_DATABASE_URL"]
async fn repeated_ingest_is_idempotent() {
    let _guard = db::acquire_test_lock();
    let (database, repo) = prepared_repository().await;
    let service = IngestionService::new(Arc::new(repo));
    let map = sample_map();

    let first = service.ingest(&map).await;
    assert_eq!(first.companies, 3);
    assert_eq!(first.inserted, 6);

    let second = service.ingest(&map).await;
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 6);
    assert_eq!(db::count_rows(&database, "companies"), 3);
    assert_eq!(db::count_rows(&database, "vacancies"), 6);
}

#[tokio::test]
#[ignore = "needs PostgreSQL via TEST_DATABASE_URL"]
async fn sql_catalog_matches_in_memory_catalog() {
    let _guard = db::acquire_test_lock();
    let (database, repo) = prepared_repository().await;
    let map = sample_map();
    IngestionService::new(Arc::new(VacancyRepositoryImpl::new(Arc::clone(&database))))
        .ingest(&map)
        .await;

    let sql: &dyn VacancyCatalog = &repo;
    let memory = InMemoryCatalog::new(map);

    let listed = sql.list_vacancies().await.unwrap();
    assert_eq!(listed, memory.list_vacancies().await.unwrap());
    let areas: Vec<Option<&str>> = listed.iter().map(|v| v.area.as_deref()).collect();
    assert!(areas.contains(&Some("Saint Petersburg")));
    assert!(areas.contains(&None));
    assert_eq!(
        sql.count_by_company().await.unwrap(),
        memory.count_by_company().await.unwrap()
    );

    let sql_avg = sql.average_salary().await.unwrap().unwrap();
    let memory_avg = memory.average_salary().await.unwrap().unwrap();
    assert!((sql_avg - memory_avg).abs() < 1e-6);

    for keyword in ["ENGINEER", "ИНЖЕНЕР", ""] {
        assert_eq!(
            sql.search_by_keyword(keyword).await.unwrap(),
            memory.search_by_keyword(keyword).await.unwrap(),
            "keyword {:?}",
            keyword
        );
    }
    assert_eq!(
        sql.above_salary(memory_avg).await.unwrap(),
        memory.above_salary(memory_avg).await.unwrap()
    );
}

#[tokio::test]
#[ignore = "needs PostgreSQL via TEST_DATABASE_URL"]
async fn empty_database_has_no_average() {
    let _guard = db::acquire_test_lock();
    let (_database, repo) = prepared_repository().await;

    assert_eq!(repo.average_salary().await.unwrap(), None);
    assert!(repo.count_by_company().await.unwrap().is_empty());
    assert!(repo.list_vacancies().await.unwrap().is_empty());
}
