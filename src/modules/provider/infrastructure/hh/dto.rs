/// hh.ru `GET /vacancies` payload
///
/// Only the fields the mapper reads are declared. Every field is lenient: a
/// value of the wrong type (or an item that is not an object) becomes
/// `None`/skipped instead of failing the whole page.
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HhVacancyPage {
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<HhVacancy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HhVacancy {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub salary: Option<HhSalary>,
    #[serde(default, deserialize_with = "lenient")]
    pub alternate_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub employer: Option<HhEmployer>,
    #[serde(default, deserialize_with = "lenient")]
    pub area: Option<HhArea>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HhSalary {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub from: Option<i32>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub to: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HhEmployer {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HhArea {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Whole numbers pass through, fractional ones are rounded, anything else
/// (strings, out-of-range values) is treated as absent
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .map(f64::round)
        .filter(|amount| *amount >= f64::from(i32::MIN) && *amount <= f64::from(i32::MAX))
        .map(|amount| amount as i32))
}

/// Items that are not vacancy objects are skipped
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<HhVacancy>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
