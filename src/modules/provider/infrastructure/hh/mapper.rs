use super::dto::HhVacancy;
use crate::modules::vacancies::domain::{SalaryRange, Vacancy, NOT_SPECIFIED};

pub struct HhMapper;

impl HhMapper {
    /// Missing title or employer name fall back to the placeholder; a missing
    /// link stays `None` so it never collides with another vacancy's URL.
    pub fn to_domain(item: HhVacancy) -> Vacancy {
        let salary = item
            .salary
            .map(|s| SalaryRange::new(s.from, s.to))
            .unwrap_or_default();

        Vacancy {
            title: non_empty(item.name).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            salary,
            url: non_empty(item.alternate_url),
            company: non_empty(item.employer.and_then(|e| e.name))
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            area: non_empty(item.area.and_then(|a| a.name)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
