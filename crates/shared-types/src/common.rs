use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A list response: either a bare JSON array or an object wrapping the
/// array in `data` (paginated backend responses).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Wrapped { data } => data,
        }
    }
}

/// Patient fields embedded in related records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nom", default, deserialize_with = "string_or_empty")]
    pub last_name: String,
    #[serde(rename = "prenom", default, deserialize_with = "string_or_empty")]
    pub first_name: String,
    #[serde(default)]
    pub age: Option<u32>,
}

impl PatientSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Treat `null` as an empty string.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat `null` as the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept `true`/`false`, `0`/`1` and `"0"`/`"1"`; `null` is `false`.
pub fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Bool(b)) => b,
        Some(Raw::Int(n)) => n != 0,
        Some(Raw::Text(s)) => matches!(s.trim(), "1" | "true"),
        None => false,
    })
}

/// Keep a decimal as its text. Decimal columns come back as strings, and
/// sometimes as numbers; `null` is empty.
pub fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => n.to_string(),
        Some(Raw::Text(s)) => s.trim().to_string(),
        None => String::new(),
    })
}

/// The `YYYY-MM-DD` part of a date or ISO timestamp.
pub fn date_part(value: &str) -> &str {
    let value = value.trim();
    value.split(['T', ' ']).next().unwrap_or(value)
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_part(value), "%Y-%m-%d").ok()
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
