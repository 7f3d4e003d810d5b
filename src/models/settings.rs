//! Configuration documents edited by the settings screens. Each keeps the
//! fields it does not model in `extra`, so a fetch-edit-save cycle does not
//! drop backend data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::common::HasId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, alias = "smtpHost")]
    pub host: String,
    #[serde(default, alias = "smtpPort")]
    pub port: u16,
    #[serde(default)]
    pub secure: bool,
    #[serde(default, alias = "user")]
    pub username: String,
    /// Write-only; the backend never returns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub from_name: Option<String>,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPreset {
    #[serde(default, alias = "id")]
    pub name: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub template_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default, alias = "htmlContent", alias = "content")]
    pub body: String,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    #[serde(default)]
    pub subject: String,
    #[serde(default, alias = "html", alias = "body")]
    pub content: String,
}

/// Weights in percent; they must add up to 100 before a save is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchingCriteria {
    #[serde(alias = "skillsWeight")]
    pub skills: u32,
    #[serde(alias = "experienceWeight")]
    pub experience: u32,
    #[serde(alias = "educationWeight")]
    pub education: u32,
    #[serde(alias = "relevanceWeight")]
    pub relevance: u32,
}

impl MatchingCriteria {
    pub fn weights(&self) -> [u32; 4] {
        [self.skills, self.experience, self.education, self.relevance]
    }

    pub fn total(&self) -> u64 {
        self.weights().iter().map(|w| u64::from(*w)).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiConfig {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Write-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub has_api_key: bool,
    #[serde(default, alias = "threshold")]
    pub shortlist_threshold: u32,
    #[serde(default)]
    pub auto_match: bool,
    #[serde(default)]
    pub matching_criteria: MatchingCriteria,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingAiConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub caller_id: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub call_window_start: Option<String>,
    #[serde(default)]
    pub call_window_end: Option<String>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub auto_call_shortlisted: bool,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleIntegration {
    #[serde(default, alias = "isConnected")]
    pub connected: bool,
    #[serde(default)]
    pub calendar_id: Option<String>,
    #[serde(default)]
    pub auto_generate_meet_link: bool,
    #[serde(default)]
    pub connected_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailIntegration {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub notify_on_application: bool,
    #[serde(default)]
    pub notify_on_interview: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    #[serde(default, alias = "googleCalendar")]
    pub google: GoogleIntegration,
    #[serde(default)]
    pub email: EmailIntegration,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFeature {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    #[serde(default)]
    pub hero_title: String,
    #[serde(default)]
    pub hero_subtitle: String,
    #[serde(default)]
    pub about_title: Option<String>,
    #[serde(default)]
    pub about_content: Option<String>,
    #[serde(default)]
    pub features: Vec<HomeFeature>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Answer of the various `.../test` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionCheck {
    pub success: bool,
    pub message: Option<String>,
}

impl HasId for EmailTemplate {
    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.template_type)
    }
}
