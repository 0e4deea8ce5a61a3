//! Raw shapes of the JSON data files, as authored.
//!
//! Deserialisation never fails on a field: arrays of the wrong type become
//! absent, scalars that are not strings or numbers become empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteDocument {
    #[serde(deserialize_with = "list")]
    pub items: Option<Vec<RawEntry>>,
    #[serde(deserialize_with = "list")]
    pub years: Option<Vec<YearGroup>>,
    #[serde(deserialize_with = "list")]
    pub categories: Option<Vec<CategoryGroup>>,
}

impl SiteDocument {
    /// Anything that is not an object with the expected keys yields an empty document.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Shape A carries `id`/`label`, Shape B carries `year`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct YearGroup {
    #[serde(deserialize_with = "text")]
    pub id: String,
    #[serde(deserialize_with = "text")]
    pub label: String,
    #[serde(deserialize_with = "text")]
    pub year: String,
    #[serde(deserialize_with = "list")]
    pub entries: Option<Vec<RawEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryGroup {
    #[serde(deserialize_with = "text")]
    pub key: String,
    #[serde(deserialize_with = "text")]
    pub label: String,
    #[serde(deserialize_with = "list")]
    pub years: Option<Vec<YearGroup>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub url: String,
    #[serde(deserialize_with = "text")]
    pub updated: String,
    #[serde(deserialize_with = "text")]
    pub meta: String,
    #[serde(deserialize_with = "list")]
    pub rows: Option<Vec<RawRow>>,
    #[serde(deserialize_with = "list")]
    pub files: Option<Vec<RawDoc>>,
    #[serde(deserialize_with = "list")]
    pub lines: Option<Vec<RawLine>>,
    #[serde(deserialize_with = "list")]
    pub docs: Option<Vec<RawDoc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRow {
    #[serde(deserialize_with = "text")]
    pub key: String,
    #[serde(deserialize_with = "text")]
    pub value: String,
}

/// A labelled line. Results files put the content in `value`; news files use
/// `text` and may attach link `actions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLine {
    #[serde(deserialize_with = "text")]
    pub label: String,
    #[serde(deserialize_with = "text")]
    pub value: String,
    #[serde(deserialize_with = "text")]
    pub text: String,
    #[serde(deserialize_with = "list")]
    pub actions: Option<Vec<RawDoc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDoc {
    #[serde(deserialize_with = "text")]
    pub label: String,
    #[serde(deserialize_with = "text")]
    pub url: String,
    #[serde(rename = "type", deserialize_with = "text")]
    pub kind: String,
    #[serde(deserialize_with = "text")]
    pub target: String,
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => Some(
            values
                .into_iter()
                .map(|value| T::deserialize(value).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}
