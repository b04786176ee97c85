/// Database test utilities with singleton pattern
///
/// Tests that need PostgreSQL are `#[ignore]`d by default; run them with
/// `--ignored` and TEST_DATABASE_URL pointing at a UTF-8 database.
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use hh_vacancies_lib::shared::infrastructure::DbPool;
use hh_vacancies_lib::shared::Database;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

static DB_POOL: OnceLock<DbPool> = OnceLock::new();

/// Get or create the shared test database pool
pub fn test_database() -> Arc<Database> {
    let pool = DB_POOL.get_or_init(|| {
        dotenvy::dotenv().ok();
        let test_db_url = std::env::var("TEST_DATABASE_URL")
            .expect("TEST_DATABASE_URL must be set to run database tests");

        let manager = ConnectionManager::<PgConnection>::new(test_db_url);
        Pool::builder()
            .max_size(5)
            .build(manager)
            .expect("Failed to create test database pool")
    });

    Arc::new(Database::from_pool(pool.clone()))
}

/// Remove every company and vacancy; call after migrations have run
pub fn clean_test_db(db: &Database) {
    let mut conn = db.get_connection().expect("Failed to get DB connection");
    diesel::sql_query("TRUNCATE TABLE vacancies, companies RESTART IDENTITY CASCADE")
        .execute(&mut conn)
        .expect("Failed to clean vacancy tables");
}

pub fn count_rows(db: &Database, table: &str) -> i64 {
    #[derive(QueryableByName)]
    struct CountRow {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        count: i64,
    }

    let mut conn = db.get_connection().expect("Failed to get DB connection");
    diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {}", table))
        .get_result::<CountRow>(&mut conn)
        .expect("Failed to count rows")
        .count
}

static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Serialize database tests within one test binary
pub fn acquire_test_lock() -> MutexGuard<'static, ()> {
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
