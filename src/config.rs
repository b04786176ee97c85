//! Runtime configuration.
//!
//! Values come from an optional dotenv-format file followed by the process
//! environment. Components receive the parsed structs in their constructors.

use crate::modules::vacancies::domain::EmployerRef;
use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.hh.ru";
pub const DEFAULT_USER_AGENT: &str = "hh-vacancies/0.1 (vacancy-statistics)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGES_PER_COMPANY: u32 = 5;
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Top-level configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// `None` when no database settings were provided
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load `path` (or `.env` when `None`) into the environment, then read it.
    /// A missing default `.env` is not an error; a missing explicit file is.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    AppError::ConfigError(format!(
                        "Failed to read config file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api = ApiConfig {
            base_url: get("HH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            user_agent: get("HH_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout_secs: parse_or(get("HH_TIMEOUT_SECS"), "HH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            pages_per_company: parse_or(
                get("HH_PAGES_PER_COMPANY"),
                "HH_PAGES_PER_COMPANY",
                DEFAULT_PAGES_PER_COMPANY,
            )?,
            employers: parse_employers(get("HH_EMPLOYERS").as_deref().unwrap_or(""))?,
        };

        let database = match get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig::from_url(url)?),
            None => DatabaseConfig::from_parts(
                get("DB_HOST"),
                get("DB_PORT"),
                get("DB_USER"),
                get("DB_PASSWORD"),
                get("DB_NAME"),
            )?,
        };

        Ok(Self { api, database })
    }
}

/// Vacancy API settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub pages_per_company: u32,
    /// Empty means the unscoped global listing is fetched instead
    pub employers: Vec<EmployerRef>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            pages_per_company: DEFAULT_PAGES_PER_COMPANY,
            employers: Vec::new(),
        }
    }
}

/// PostgreSQL connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_url(url: impl Into<String>) -> AppResult<Self> {
        let url = url.into();
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(AppError::ConfigError(
                "Invalid database URL format. Must start with postgres:// or postgresql://"
                    .to_string(),
            ));
        }

        Ok(Self {
            url,
            max_connections: 5,
        })
    }

    /// Assemble a URL from separate credentials. Returns `Ok(None)` when none of
    /// them is set, and an error when only some of the required ones are.
    pub fn from_parts(
        host: Option<String>,
        port: Option<String>,
        user: Option<String>,
        password: Option<String>,
        database: Option<String>,
    ) -> AppResult<Option<Self>> {
        if host.is_none() && user.is_none() && database.is_none() && password.is_none() {
            return Ok(None);
        }

        let (host, user, database) = match (host, user, database) {
            (Some(host), Some(user), Some(database)) => (host, user, database),
            _ => {
                return Err(AppError::ConfigError(
                    "DB_HOST, DB_USER and DB_NAME must all be set".to_string(),
                ))
            }
        };
        let port: u16 = parse_or(port, "DB_PORT", DEFAULT_DB_PORT)?;

        let credentials = match password {
            Some(password) => format!(
                "{}:{}",
                urlencoding::encode(&user),
                urlencoding::encode(&password)
            ),
            None => urlencoding::encode(&user).into_owned(),
        };

        Self::from_url(format!(
            "postgres://{}@{}:{}/{}",
            credentials,
            host,
            port,
            urlencoding::encode(&database)
        ))
        .map(Some)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Host and database part of the URL, safe to log
    pub fn redacted_target(&self) -> &str {
        self.url.rsplit('@').next().unwrap_or("unknown_host")
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("target", &self.redacted_target())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> AppResult<T> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::ConfigError(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

/// Parse `id:name` pairs separated by commas
pub fn parse_employers(raw: &str) -> AppResult<Vec<EmployerRef>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((id, name)) if !id.trim().is_empty() && !name.trim().is_empty() => {
                Ok(EmployerRef::new(id.trim(), name.trim()))
            }
            _ => Err(AppError::ConfigError(format!(
                "HH_EMPLOYERS entry '{}' must look like id:name",
                entry
            ))),
        })
        .collect()
}
