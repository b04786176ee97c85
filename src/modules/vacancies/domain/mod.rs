pub mod aggregates;
pub mod entities;
pub mod repository;
pub mod salary;

pub use entities::{
    CompanyCount, CompanyId, EmployerRef, NewCompany, NewVacancy, Vacancy, VacancyMap,
    NOT_SPECIFIED, NO_LINK,
};
pub use repository::{VacancyCatalog, VacancyRepository};
pub use salary::SalaryRange;
