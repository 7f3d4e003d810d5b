use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{deserialize_number_flexible, HasId};

wire_enum! {
    pub enum PositionStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

impl PositionStatus {
    pub fn toggled(self) -> Self {
        match self {
            PositionStatus::Active => PositionStatus::Inactive,
            PositionStatus::Inactive => PositionStatus::Active,
        }
    }
}

impl Default for PositionStatus {
    fn default() -> Self {
        PositionStatus::Active
    }
}

wire_enum! {
    pub enum JobType {
        FullTime => "full-time",
        PartTime => "part-time",
        Contract => "contract",
        Internship => "internship",
        Remote => "remote",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default, deserialize_with = "deserialize_number_flexible")]
    pub minimum_experience: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number_flexible")]
    pub relevant_experience: Option<f64>,
    #[serde(default)]
    pub status: PositionStatus,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub applications_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HasId for Position {
    fn id(&self) -> &str {
        &self.id
    }
}

/// List filter offered by the positions screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionFilter {
    #[default]
    All,
    Only(PositionStatus),
}

impl PositionFilter {
    pub fn matches(&self, position: &Position) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Only(status) => position.status == *status,
        }
    }

    pub fn status(&self) -> Option<PositionStatus> {
        match self {
            PositionFilter::All => None,
            PositionFilter::Only(status) => Some(*status),
        }
    }
}

impl std::str::FromStr for PositionFilter {
    type Err = crate::error::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(PositionFilter::All);
        }
        raw.parse::<PositionStatus>().map(PositionFilter::Only)
    }
}
