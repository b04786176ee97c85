use anyhow::Context;
use hh_vacancies_lib::{
    config::DatabaseConfig,
    log_info, log_warn,
    modules::{
        console::ConsoleMenu,
        provider::{FanOutAggregator, FanOutReport, HhClient, PaginatedFetcher},
        vacancies::{
            InMemoryCatalog, IngestionService, VacancyCatalog, VacancyMap, VacancyRepository,
            VacancyRepositoryImpl,
        },
    },
    shared::{utils::init_logger, Database},
    AppConfig, AppResult,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    let client = HhClient::new(&config.api).context("Failed to create hh.ru client")?;
    let fetcher = Arc::new(PaginatedFetcher::new(Arc::new(client)));
    let aggregator = FanOutAggregator::new(fetcher);

    let report = if config.api.employers.is_empty() {
        log_info!(
            "No employers configured, fetching {} pages of the global listing",
            config.api.pages_per_company
        );
        aggregator.fetch_unscoped(config.api.pages_per_company).await
    } else {
        aggregator
            .fetch_all(&config.api.employers, config.api.pages_per_company)
            .await
    };
    report_fetch(&report);

    let catalog = match &config.database {
        Some(db_config) => match persist(db_config, &report.vacancies).await {
            Ok(catalog) => catalog,
            Err(e) => {
                log_warn!(
                    "Database {} unavailable ({}), using fetched vacancies only",
                    db_config.redacted_target(),
                    e
                );
                in_memory(report.vacancies)
            }
        },
        None => {
            log_info!("No database configured, using fetched vacancies only");
            in_memory(report.vacancies)
        }
    };

    let stdin = io::stdin();
    let mut menu = ConsoleMenu::new(stdin.lock(), io::stdout(), catalog);
    menu.run().await.context("Console menu failed")?;

    Ok(())
}

fn report_fetch(report: &FanOutReport) {
    println!(
        "Fetched {} vacancies from {} companies in {:.2} seconds",
        report.total_vacancies(),
        report.vacancies.len(),
        report.elapsed.as_secs_f64()
    );
    for notice in &report.notices {
        println!(
            "Warning: vacancies for '{}' stopped at page {}: {}",
            notice.employer, notice.page, notice.reason
        );
    }
    for failure in &report.failures {
        println!("Error: '{}' could not be fetched: {}", failure.company, failure.reason);
    }
}

fn in_memory(vacancies: VacancyMap) -> Arc<dyn VacancyCatalog> {
    Arc::new(InMemoryCatalog::new(vacancies))
}

/// Store the fetched vacancies and serve queries from the database
async fn persist(
    db_config: &DatabaseConfig,
    vacancies: &VacancyMap,
) -> AppResult<Arc<dyn VacancyCatalog>> {
    let database = Arc::new(Database::new(db_config)?);
    let repository = Arc::new(VacancyRepositoryImpl::new(database));
    repository.setup_tables().await?;

    let summary = IngestionService::new(repository.clone()).ingest(vacancies).await;
    println!(
        "Stored {} new vacancies for {} companies ({} already present)",
        summary.inserted, summary.companies, summary.skipped
    );
    for company in &summary.failed_companies {
        println!("Error: vacancies for '{}' were not stored", company);
    }

    let catalog: Arc<dyn VacancyCatalog> = repository;
    Ok(catalog)
}
