/// Diesel models for the companies and vacancies tables
use crate::modules::vacancies::domain::{NewCompany, NewVacancy, SalaryRange, Vacancy};
use crate::schema::{companies, vacancies};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Integer, Nullable, Text};

/// Diesel model for inserting a company
#[derive(Insertable, Debug)]
#[diesel(table_name = companies)]
pub struct NewCompanyModel {
    pub name: String,
    pub industry: Option<String>,
    pub area: Option<String>,
}

impl From<&NewCompany> for NewCompanyModel {
    fn from(company: &NewCompany) -> Self {
        Self {
            name: company.name.clone(),
            industry: company.industry.clone(),
            area: company.area.clone(),
        }
    }
}

/// Diesel model for inserting a vacancy
#[derive(Insertable, Debug)]
#[diesel(table_name = vacancies)]
pub struct NewVacancyModel {
    pub title: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub url: Option<String>,
    pub area: Option<String>,
    pub company_id: i32,
}

impl From<&NewVacancy> for NewVacancyModel {
    fn from(vacancy: &NewVacancy) -> Self {
        Self {
            title: vacancy.title.clone(),
            salary_min: vacancy.salary.from,
            salary_max: vacancy.salary.to,
            url: vacancy.url.clone(),
            area: vacancy.area.clone(),
            company_id: vacancy.company_id.0,
        }
    }
}

/// Row of the vacancies/companies join
#[derive(QueryableByName, Debug)]
pub struct VacancyRow {
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Nullable<Integer>)]
    pub salary_min: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub salary_max: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub url: Option<String>,
    #[diesel(sql_type = Text)]
    pub company_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub area: Option<String>,
}

impl VacancyRow {
    pub fn into_vacancy(self) -> Vacancy {
        Vacancy {
            title: self.title,
            salary: SalaryRange::new(self.salary_min, self.salary_max),
            url: self.url,
            company: self.company_name,
            area: self.area,
        }
    }
}

#[derive(QueryableByName, Debug)]
pub struct CompanyCountRow {
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

#[derive(QueryableByName, Debug)]
pub struct AverageRow {
    #[diesel(sql_type = Nullable<Double>)]
    pub average: Option<f64>,
}
