/// Diesel-based implementation of VacancyRepository and VacancyCatalog
///
/// Writes are idempotent on natural keys: company name and vacancy URL.
/// Aggregates are computed in SQL with the same salary rules as the
/// in-memory catalog.
use super::models::{AverageRow, CompanyCountRow, NewCompanyModel, NewVacancyModel, VacancyRow};
use crate::modules::vacancies::domain::{
    aggregates::VacancyAggregator, CompanyCount, CompanyId, NewCompany, NewVacancy, Vacancy,
    VacancyCatalog, VacancyMap, VacancyRepository,
};
use crate::schema::{companies, vacancies};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;
use crate::{log_debug, log_info, log_warn};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Double, Text};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Rows per INSERT statement, well below the PostgreSQL bind parameter limit
const INSERT_CHUNK_SIZE: usize = 1000;

/// Mean of both bounds, the single present bound, or NULL
const REPRESENTATIVE_SALARY: &str = "CASE \
     WHEN v.salary_min IS NOT NULL AND v.salary_max IS NOT NULL \
         THEN (v.salary_min::float8 + v.salary_max::float8) / 2 \
     ELSE COALESCE(v.salary_min, v.salary_max)::float8 \
 END";

const VACANCY_COLUMNS: &str = "v.title, v.salary_min, v.salary_max, v.url, \
     c.name AS company_name, v.area";

pub struct VacancyRepositoryImpl {
    db: Arc<Database>,
}

impl VacancyRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Names of every stored company, in byte order like the in-memory map
    fn load_company_names(conn: &mut PgConnection) -> QueryResult<Vec<String>> {
        diesel::sql_query("SELECT name FROM companies ORDER BY name COLLATE \"C\"")
            .load::<CompanyNameRow>(conn)
            .map(|rows| rows.into_iter().map(|row| row.name).collect())
    }
}

#[derive(QueryableByName)]
struct CompanyNameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct CtypeRow {
    #[diesel(sql_type = Text)]
    ctype: String,
}

/// `lower()` folds non-ASCII letters (Cyrillic titles) only under a UTF-8 ctype
fn ctype_folds_unicode(ctype: &str) -> bool {
    let ctype = ctype.to_ascii_lowercase();
    ctype.contains("utf-8") || ctype.contains("utf8")
}

#[async_trait]
impl VacancyRepository for VacancyRepositoryImpl {
    async fn setup_tables(&self) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
                AppError::DatabaseError(format!("Failed to run database migrations: {}", e))
            })?;
            log_info!("Database schema ready ({} migrations applied)", applied.len());

            let row: CtypeRow =
                diesel::sql_query("SELECT current_setting('lc_ctype') AS ctype").get_result(&mut conn)?;
            if !ctype_folds_unicode(&row.ctype) {
                log_warn!(
                    "Database LC_CTYPE is '{}'; keyword search will only ignore ASCII case",
                    row.ctype
                );
            }
            Ok(())
        })
        .await?
    }

    async fn upsert_company(&self, company: &NewCompany) -> AppResult<CompanyId> {
        let db = Arc::clone(&self.db);
        let model = NewCompanyModel::from(company);

        task::spawn_blocking(move || -> AppResult<CompanyId> {
            let mut conn = db.get_connection()?;

            let id = conn.transaction::<i32, diesel::result::Error, _>(|conn| {
                let inserted: Option<i32> = diesel::insert_into(companies::table)
                    .values(&model)
                    .on_conflict(companies::name)
                    .do_nothing()
                    .returning(companies::id)
                    .get_result(conn)
                    .optional()?;

                match inserted {
                    Some(id) => {
                        log_debug!("Created company '{}' with id {}", model.name, id);
                        Ok(id)
                    }
                    None => companies::table
                        .filter(companies::name.eq(&model.name))
                        .select(companies::id)
                        .first(conn),
                }
            })?;

            Ok(CompanyId(id))
        })
        .await?
    }

    async fn get_company_id(&self, name: &str) -> AppResult<Option<CompanyId>> {
        let db = Arc::clone(&self.db);
        let name = name.to_string();

        task::spawn_blocking(move || -> AppResult<Option<CompanyId>> {
            let mut conn = db.get_connection()?;

            let id = companies::table
                .filter(companies::name.eq(&name))
                .select(companies::id)
                .first::<i32>(&mut conn)
                .optional()?;

            Ok(id.map(CompanyId))
        })
        .await?
    }

    async fn insert_vacancies_bulk(&self, records: &[NewVacancy]) -> AppResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let db = Arc::clone(&self.db);
        let models: Vec<NewVacancyModel> = records.iter().map(NewVacancyModel::from).collect();

        task::spawn_blocking(move || -> AppResult<usize> {
            let start = Instant::now();
            let mut conn = db.get_connection()?;

            let inserted = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
                let mut inserted = 0;
                for chunk in models.chunks(INSERT_CHUNK_SIZE) {
                    inserted += diesel::insert_into(vacancies::table)
                        .values(chunk)
                        .on_conflict(vacancies::url)
                        .do_nothing()
                        .execute(conn)?;
                }
                Ok(inserted)
            })?;

            LogContext::db_operation(
                "bulk insert",
                "vacancies",
                Some(start.elapsed().as_millis() as u64),
            );
            Ok(inserted)
        })
        .await?
    }
}

#[async_trait]
impl VacancyCatalog for VacancyRepositoryImpl {
    async fn list_vacancies(&self) -> AppResult<Vec<Vacancy>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Vacancy>> {
            let mut conn = db.get_connection()?;

            let rows: Vec<VacancyRow> = diesel::sql_query(format!(
                "SELECT {} FROM vacancies v \
                 JOIN companies c ON v.company_id = c.id \
                 ORDER BY c.name COLLATE \"C\", v.id",
                VACANCY_COLUMNS
            ))
            .load(&mut conn)?;

            Ok(rows.into_iter().map(VacancyRow::into_vacancy).collect())
        })
        .await?
    }

    async fn count_by_company(&self) -> AppResult<Vec<CompanyCount>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<CompanyCount>> {
            let mut conn = db.get_connection()?;

            let rows: Vec<CompanyCountRow> = diesel::sql_query(
                "SELECT c.name, COUNT(v.id) AS count \
                 FROM companies c \
                 LEFT JOIN vacancies v ON c.id = v.company_id \
                 GROUP BY c.id, c.name \
                 ORDER BY c.name COLLATE \"C\"",
            )
            .load(&mut conn)?;

            Ok(rows
                .into_iter()
                .map(|row| CompanyCount {
                    company: row.name,
                    count: row.count,
                })
                .collect())
        })
        .await?
    }

    async fn average_salary(&self) -> AppResult<Option<f64>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<f64>> {
            let mut conn = db.get_connection()?;

            let row: AverageRow = diesel::sql_query(format!(
                "SELECT AVG({}) AS average FROM vacancies v \
                 WHERE v.salary_min IS NOT NULL OR v.salary_max IS NOT NULL",
                REPRESENTATIVE_SALARY
            ))
            .get_result(&mut conn)?;

            Ok(row.average)
        })
        .await?
    }

    async fn search_by_keyword(&self, keyword: &str) -> AppResult<VacancyMap> {
        let db = Arc::clone(&self.db);
        let keyword = keyword.to_string();

        task::spawn_blocking(move || -> AppResult<VacancyMap> {
            let mut conn = db.get_connection()?;

            // strpos keeps '%' and '_' literal, matching the in-memory substring test
            let rows: Vec<VacancyRow> = diesel::sql_query(format!(
                "SELECT {} FROM vacancies v \
                 JOIN companies c ON v.company_id = c.id \
                 WHERE strpos(lower(v.title), lower($1)) > 0 \
                 ORDER BY c.name COLLATE \"C\", v.id",
                VACANCY_COLUMNS
            ))
            .bind::<Text, _>(keyword)
            .load(&mut conn)?;

            let mut grouped: VacancyMap = Self::load_company_names(&mut conn)?
                .into_iter()
                .map(|name| (name, Vec::new()))
                .collect();
            for (company, matches) in
                VacancyAggregator::group_by_company(rows.into_iter().map(VacancyRow::into_vacancy))
            {
                grouped.insert(company, matches);
            }

            Ok(grouped)
        })
        .await?
    }

    async fn above_salary(&self, threshold: f64) -> AppResult<Vec<Vacancy>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Vacancy>> {
            let mut conn = db.get_connection()?;

            let rows: Vec<VacancyRow> = diesel::sql_query(format!(
                "SELECT {} FROM vacancies v \
                 JOIN companies c ON v.company_id = c.id \
                 WHERE {} > $1 \
                 ORDER BY c.name COLLATE \"C\", v.id",
                VACANCY_COLUMNS, REPRESENTATIVE_SALARY
            ))
            .bind::<Double, _>(threshold)
            .load(&mut conn)?;

            Ok(rows.into_iter().map(VacancyRow::into_vacancy).collect())
        })
        .await?
    }
}
