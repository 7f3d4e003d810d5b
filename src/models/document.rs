use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::HasId;

wire_enum! {
    pub enum DocumentStatus {
        Pending => "pending",
        Verified => "verified",
        Rejected => "rejected",
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Pending
    }
}

/// Documents a selected candidate is asked to provide before joining.
pub const REQUIRED_DOCUMENT_TYPES: &[&str] = &[
    "id_proof",
    "address_proof",
    "education_certificate",
    "experience_letter",
    "pan_card",
    "bank_details",
    "photo",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDocument {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub selected_candidate: Option<serde_json::Value>,
    #[serde(default)]
    pub document_type: String,
    #[serde(default, alias = "originalName")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl HasId for CandidateDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Per-candidate completion counts shown in the selected candidates table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentCounts {
    pub uploaded: usize,
    pub verified: usize,
    pub rejected: usize,
    pub pending: usize,
    pub required: usize,
}

impl DocumentCounts {
    pub fn from_documents(documents: &[CandidateDocument]) -> Self {
        let mut counts = DocumentCounts {
            required: REQUIRED_DOCUMENT_TYPES.len(),
            ..Default::default()
        };
        for doc in documents {
            counts.uploaded += 1;
            match doc.status {
                DocumentStatus::Verified => counts.verified += 1,
                DocumentStatus::Rejected => counts.rejected += 1,
                DocumentStatus::Pending => counts.pending += 1,
            }
        }
        counts
    }

    pub fn is_complete(&self) -> bool {
        self.verified >= self.required
    }
}

impl std::fmt::Display for DocumentCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} verified ({} pending, {} rejected)",
            self.verified, self.required, self.pending, self.rejected
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocumentListPayload {
    Wrapped { documents: Vec<CandidateDocument> },
    Items(Vec<CandidateDocument>),
}

impl From<DocumentListPayload> for Vec<CandidateDocument> {
    fn from(value: DocumentListPayload) -> Self {
        match value {
            DocumentListPayload::Wrapped { documents } => documents,
            DocumentListPayload::Items(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_by_status() {
        let docs: Vec<CandidateDocument> = serde_json::from_value(json!([
            {"_id": "d1", "documentType": "id_proof", "status": "verified"},
            {"_id": "d2", "documentType": "photo", "status": "rejected", "rejectionReason": "blurry"},
            {"_id": "d3", "documentType": "pan_card"}
        ]))
        .unwrap();
        let counts = DocumentCounts::from_documents(&docs);
        assert_eq!(counts.uploaded, 3);
        assert_eq!(counts.verified, 1);
        assert_eq!(counts.rejected, 1);
        assert_eq!(counts.pending, 1);
        assert!(!counts.is_complete());
        assert_eq!(counts.to_string(), "1/7 verified (1 pending, 1 rejected)");
    }
}
