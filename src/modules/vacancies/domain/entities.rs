/// Domain entities for companies and their vacancies
///
/// Companies are identified by name. Vacancies are immutable once stored and
/// always reference an existing company through its surrogate id.
use super::salary::SalaryRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder for a missing title, employer name or salary bound
pub const NOT_SPECIFIED: &str = "Not specified";

/// Placeholder shown for a vacancy without a link
pub const NO_LINK: &str = "No link";

/// Surrogate key of a stored company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompanyId(pub i32);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attributes used when a company is referenced for the first time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCompany {
    pub name: String,
    pub industry: Option<String>,
    pub area: Option<String>,
}

impl NewCompany {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A single job posting as fetched or loaded from storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub title: String,
    pub salary: SalaryRange,
    /// Source link; also the natural dedup key in storage
    pub url: Option<String>,
    pub company: String,
    pub area: Option<String>,
}

impl Vacancy {
    pub fn representative_salary(&self) -> Option<f64> {
        self.salary.representative()
    }

    pub fn display_url(&self) -> &str {
        self.url.as_deref().unwrap_or(NO_LINK)
    }

    /// Case-insensitive substring match against the title.
    /// `keyword` must already be lowercased.
    pub fn title_contains(&self, keyword: &str) -> bool {
        self.title.to_lowercase().contains(keyword)
    }
}

/// Vacancy bound to a stored company, ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewVacancy {
    pub company_id: CompanyId,
    pub title: String,
    pub salary: SalaryRange,
    pub url: Option<String>,
    pub area: Option<String>,
}

impl NewVacancy {
    pub fn from_vacancy(company_id: CompanyId, vacancy: &Vacancy) -> Self {
        Self {
            company_id,
            title: vacancy.title.clone(),
            salary: vacancy.salary,
            url: vacancy.url.clone(),
            area: vacancy.area.clone(),
        }
    }
}

/// Employer to fetch vacancies for: source-side id plus display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerRef {
    pub id: String,
    pub name: String,
}

impl EmployerRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCount {
    pub company: String,
    pub count: i64,
}

/// Vacancies grouped by company name
pub type VacancyMap = BTreeMap<String, Vec<Vacancy>>;
