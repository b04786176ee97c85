pub mod console;
pub mod provider;
pub mod vacancies;
