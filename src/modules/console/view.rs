//! Text rendering for the console menu.

use crate::modules::vacancies::domain::{CompanyCount, Vacancy, VacancyMap};
use std::io::{self, Write};

pub fn vacancy_line(vacancy: &Vacancy) -> String {
    format!(
        "{} ({}), link: {}",
        vacancy.title,
        vacancy.salary,
        vacancy.display_url()
    )
}

/// Flat listing, each line prefixed with the company name
pub fn write_vacancies<W: Write>(out: &mut W, vacancies: &[Vacancy]) -> io::Result<()> {
    for vacancy in vacancies {
        writeln!(out, "- {}: {}", vacancy.company, vacancy_line(vacancy))?;
    }
    writeln!(out, "\nTotal vacancies: {}", vacancies.len())
}

/// Listing grouped by company; groups without vacancies are not printed
pub fn write_grouped<W: Write>(out: &mut W, grouped: &VacancyMap) -> io::Result<usize> {
    let mut total = 0;
    for (company, vacancies) in grouped.iter().filter(|(_, list)| !list.is_empty()) {
        writeln!(out, "\nCompany: {}", company)?;
        for vacancy in vacancies {
            writeln!(out, "  - {}", vacancy_line(vacancy))?;
        }
        total += vacancies.len();
    }
    Ok(total)
}

pub fn write_counts<W: Write>(out: &mut W, counts: &[CompanyCount]) -> io::Result<()> {
    for entry in counts {
        writeln!(out, "- {}: {} vacancies", entry.company, entry.count)?;
    }
    let total: i64 = counts.iter().map(|c| c.count).sum();
    writeln!(out, "\nTotal vacancies: {}", total)
}

pub fn write_average<W: Write>(out: &mut W, average: Option<f64>) -> io::Result<()> {
    match average {
        Some(value) => writeln!(out, "\nAverage salary: {:.2}", value),
        None => writeln!(out, "\nNo data to calculate the average salary."),
    }
}
