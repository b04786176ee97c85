use super::entities::{CompanyCount, Vacancy, VacancyMap};

/// Aggregate queries over vacancies grouped by company
pub struct VacancyAggregator;

impl VacancyAggregator {
    /// Group a flat list by company name, preserving per-company order
    pub fn group_by_company(vacancies: impl IntoIterator<Item = Vacancy>) -> VacancyMap {
        let mut grouped = VacancyMap::new();
        for vacancy in vacancies {
            grouped
                .entry(vacancy.company.clone())
                .or_default()
                .push(vacancy);
        }
        grouped
    }

    pub fn count_by_company(vacancies: &VacancyMap) -> Vec<CompanyCount> {
        vacancies
            .iter()
            .map(|(company, list)| CompanyCount {
                company: company.clone(),
                count: list.len() as i64,
            })
            .collect()
    }

    pub fn average_salary(vacancies: &VacancyMap) -> Option<f64> {
        Self::average_of(vacancies.values().flatten())
    }

    /// Mean representative salary; vacancies without any bound are skipped
    pub fn average_of<'a>(vacancies: impl IntoIterator<Item = &'a Vacancy>) -> Option<f64> {
        let (total, count) = vacancies
            .into_iter()
            .filter_map(Vacancy::representative_salary)
            .fold((0.0_f64, 0_usize), |(total, count), salary| {
                (total + salary, count + 1)
            });

        if count == 0 {
            None
        } else {
            Some(total / count as f64)
        }
    }

    /// Every company keeps its entry, even when nothing in it matched
    pub fn search_by_keyword(vacancies: &VacancyMap, keyword: &str) -> VacancyMap {
        let keyword = keyword.to_lowercase();
        vacancies
            .iter()
            .map(|(company, list)| {
                let matches = list
                    .iter()
                    .filter(|vacancy| vacancy.title_contains(&keyword))
                    .cloned()
                    .collect();
                (company.clone(), matches)
            })
            .collect()
    }

    pub fn above_salary(vacancies: &VacancyMap, threshold: f64) -> Vec<Vacancy> {
        vacancies
            .values()
            .flatten()
            .filter(|vacancy| {
                vacancy
                    .representative_salary()
                    .map_or(false, |salary| salary > threshold)
            })
            .cloned()
            .collect()
    }

    pub fn total(vacancies: &VacancyMap) -> usize {
        vacancies.values().map(Vec::len).sum()
    }
}
