use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::common::{ApplicationSummary, EntityRef, HasId, PositionSummary};

wire_enum! {
    /// Offer and joining lifecycle. Transitions are decided by the backend.
    pub enum SelectionStatus {
        Selected => "selected",
        OfferSent => "offer_sent",
        OfferAccepted => "offer_accepted",
        OfferRejected => "offer_rejected",
        DocumentsPending => "documents_pending",
        DocumentsSubmitted => "documents_submitted",
        DocumentsVerified => "documents_verified",
        JoiningLetterSent => "joining_letter_sent",
        Joined => "joined",
        Cancelled => "cancelled",
    }
}

impl Default for SelectionStatus {
    fn default() -> Self {
        SelectionStatus::Selected
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCandidate {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub application: Option<EntityRef<ApplicationSummary>>,
    #[serde(default)]
    pub position: Option<EntityRef<PositionSummary>>,
    #[serde(default)]
    pub status: SelectionStatus,
    #[serde(default)]
    pub offer_details: Option<JsonValue>,
    #[serde(default)]
    pub joining_details: Option<JsonValue>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "selectedAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl HasId for SelectedCandidate {
    fn id(&self) -> &str {
        &self.id
    }
}

impl SelectedCandidate {
    pub fn candidate_name(&self) -> &str {
        self.application
            .as_ref()
            .and_then(|a| a.populated())
            .map(|a| a.full_name.as_str())
            .unwrap_or("Unknown candidate")
    }

    pub fn position_title(&self) -> Option<&str> {
        self.position
            .as_ref()
            .and_then(|p| p.populated())
            .map(|p| p.title.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCandidateQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SelectionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SelectedCandidateListPayload {
    Wrapped {
        #[serde(rename = "selectedCandidates", alias = "candidates")]
        selected_candidates: Vec<SelectedCandidate>,
    },
    Items(Vec<SelectedCandidate>),
}

impl From<SelectedCandidateListPayload> for Vec<SelectedCandidate> {
    fn from(value: SelectedCandidateListPayload) -> Self {
        match value {
            SelectedCandidateListPayload::Wrapped {
                selected_candidates,
            } => selected_candidates,
            SelectedCandidateListPayload::Items(items) => items,
        }
    }
}
