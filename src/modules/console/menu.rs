use super::view;
use crate::modules::vacancies::domain::VacancyCatalog;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListVacancies,
    CountByCompany,
    AverageSalary,
    SearchByKeyword,
    AboveAverage,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::ListVacancies,
        MenuChoice::CountByCompany,
        MenuChoice::AverageSalary,
        MenuChoice::SearchByKeyword,
        MenuChoice::AboveAverage,
        MenuChoice::Exit,
    ];

    pub fn number(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0) + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ListVacancies => "Show all vacancies",
            MenuChoice::CountByCompany => "Show vacancy count by company",
            MenuChoice::AverageSalary => "Show average salary",
            MenuChoice::SearchByKeyword => "Search vacancies by keyword",
            MenuChoice::AboveAverage => "Show vacancies with above-average salary",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: usize = s.trim().parse()?;
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| AppError::InvalidInput(format!("No menu item {}", number)))
    }
}

/// Numbered menu loop. Bad input re-prompts; catalog errors are printed and
/// the loop continues.
pub struct ConsoleMenu<R, W> {
    input: R,
    output: W,
    catalog: Arc<dyn VacancyCatalog>,
}

impl<R: BufRead, W: Write> ConsoleMenu<R, W> {
    pub fn new(input: R, output: W, catalog: Arc<dyn VacancyCatalog>) -> Self {
        Self {
            input,
            output,
            catalog,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user picks Exit or input is closed
    pub async fn run(&mut self) -> AppResult<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(
                        self.output,
                        "Invalid input! Please enter a number from 1 to {}.",
                        MenuChoice::ALL.len()
                    )?;
                    continue;
                }
            };

            if choice == MenuChoice::Exit {
                writeln!(self.output, "Exiting...")?;
                return Ok(());
            }

            if let Err(e) = self.execute(choice).await {
                if let AppError::InternalError(_) = e {
                    return Err(e);
                }
                LogContext::error_with_context(&e, "Menu action failed");
                writeln!(self.output, "Error: {}", e)?;
            }
        }
    }

    async fn execute(&mut self, choice: MenuChoice) -> AppResult<()> {
        match choice {
            MenuChoice::ListVacancies => {
                let vacancies = self.catalog.list_vacancies().await?;
                writeln!(self.output, "\nAll vacancies:")?;
                view::write_vacancies(&mut self.output, &vacancies)?;
            }
            MenuChoice::CountByCompany => {
                let counts = self.catalog.count_by_company().await?;
                writeln!(self.output, "\nVacancies by company:")?;
                view::write_counts(&mut self.output, &counts)?;
            }
            MenuChoice::AverageSalary => {
                let average = self.catalog.average_salary().await?;
                view::write_average(&mut self.output, average)?;
            }
            MenuChoice::SearchByKeyword => {
                write!(self.output, "\nEnter a keyword: ")?;
                self.output.flush()?;

                // An empty keyword matches every title
                let keyword = self.read_line()?.unwrap_or_default();
                let keyword = keyword.trim();

                let found = self.catalog.search_by_keyword(keyword).await?;
                writeln!(self.output, "\nSearch results for '{}':", keyword)?;
                let total = view::write_grouped(&mut self.output, &found)?;
                writeln!(
                    self.output,
                    "\nVacancies containing '{}': {}",
                    keyword, total
                )?;
            }
            MenuChoice::AboveAverage => {
                let average = self.catalog.average_salary().await?;
                view::write_average(&mut self.output, average)?;
                if let Some(average) = average {
                    let above = self.catalog.above_salary(average).await?;
                    view::write_vacancies(&mut self.output, &above)?;
                }
            }
            MenuChoice::Exit => {}
        }
        Ok(())
    }

    fn print_menu(&mut self) -> AppResult<()> {
        writeln!(self.output, "\nChoose an action:")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}: {}", choice.number(), choice.label())?;
        }
        write!(
            self.output,
            "\nEnter action number (1-{}): ",
            MenuChoice::ALL.len()
        )?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
        }
    }
}
