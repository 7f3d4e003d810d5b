use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{ApplicationSummary, EntityRef, HasId, PositionSummary};

wire_enum! {
    pub enum InterviewType {
        Video => "video",
        Phone => "phone",
        InPerson => "in-person",
        Technical => "technical",
        Hr => "hr",
    }
}

impl Default for InterviewType {
    fn default() -> Self {
        InterviewType::Video
    }
}

wire_enum! {
    pub enum InterviewStatus {
        Scheduled => "scheduled",
        Confirmed => "confirmed",
        Completed => "completed",
        Cancelled => "cancelled",
        Rescheduled => "rescheduled",
        NoShow => "no-show",
    }
}

impl Default for InterviewStatus {
    fn default() -> Self {
        InterviewStatus::Scheduled
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interviewer {
    pub name: String,
    pub email: String,
    /// Set when picked from the user directory, absent for ad-hoc entries.
    #[serde(default, alias = "user", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub application: Option<EntityRef<ApplicationSummary>>,
    #[serde(default)]
    pub position: Option<EntityRef<PositionSummary>>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<String>,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub interview_type: InterviewType,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub interviewers: Vec<Interviewer>,
    #[serde(default)]
    pub status: InterviewStatus,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_duration() -> u32 {
    60
}

impl HasId for Interview {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Interview {
    pub fn candidate_name(&self) -> Option<&str> {
        self.application
            .as_ref()
            .and_then(|a| a.populated())
            .map(|a| a.full_name.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InterviewStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InterviewListPayload {
    Paged { interviews: Vec<Interview> },
    Items(Vec<Interview>),
}

impl From<InterviewListPayload> for Vec<Interview> {
    fn from(value: InterviewListPayload) -> Self {
        match value {
            InterviewListPayload::Paged { interviews } => interviews,
            InterviewListPayload::Items(items) => items,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewStats {
    pub total: u64,
    pub scheduled: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    #[serde(alias = "upcomingInterviews")]
    pub upcoming: u64,
    #[serde(alias = "todayInterviews")]
    pub today: u64,
}

/// Result of `POST /interviews`.
#[derive(Debug, Clone)]
pub struct ScheduledInterview {
    pub interview: Interview,
    pub meeting_link_generated: bool,
}
