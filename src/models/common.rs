use serde::{Deserialize, Deserializer, Serialize};

/// A related record the backend sends either populated or as a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef<T> {
    Populated(T),
    Id(String),
}

impl<T: HasId> EntityRef<T> {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Populated(value) => value.id(),
            EntityRef::Id(id) => id,
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            EntityRef::Populated(value) => Some(value),
            EntityRef::Id(_) => None,
        }
    }
}

pub trait HasId {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: Option<String>,
}

impl HasId for PositionSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl HasId for ApplicationSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Pagination block returned next to list payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    #[serde(alias = "currentPage")]
    pub page: u32,
    #[serde(alias = "totalPages")]
    pub pages: u32,
    #[serde(alias = "totalItems", alias = "count")]
    pub total: u64,
    pub limit: u32,
}

/// Numbers that some forms submit as strings (`"3"`) and others as numbers.
pub fn deserialize_number_flexible<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
        Null,
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None | Some(NumberOrString::Null) => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("Invalid number string: {}", s))),
    }
}
