use chrono::NaiveDate;
use serde::Serialize;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::document::DocumentStatus;
use crate::models::selected_candidate::SelectionStatus;

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OfferLetterForm {
    #[validate(length(min = 1, message = "Designation is required"))]
    pub designation: String,
    #[validate(length(min = 1, message = "Salary is required"))]
    pub salary: String,
    pub joining_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_valid_until: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl OfferLetterForm {
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if let Some(valid_until) = self.offer_valid_until {
            if valid_until > self.joining_date {
                return Err(Error::Validation(
                    "Offer validity must end on or before the joining date".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoiningLetterForm {
    pub joining_date: NaiveDate,
    #[validate(length(min = 1, message = "Reporting time is required"))]
    pub reporting_time: String,
    #[validate(length(min = 1, message = "Reporting address is required"))]
    pub reporting_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_manager: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documents_to_bring: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSelectedCandidatePayload {
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionStatusPayload {
    pub status: SelectionStatus,
}

/// Body of `PUT /candidate-documents/:id/verify`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReviewPayload {
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl DocumentReviewPayload {
    pub fn verify() -> Self {
        Self {
            status: DocumentStatus::Verified,
            rejection_reason: None,
        }
    }

    pub fn reject(reason: &str) -> Result<Self> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(Error::Validation(
                "Please provide a reason for rejection".to_string(),
            ));
        }
        Ok(Self {
            status: DocumentStatus::Rejected,
            rejection_reason: Some(reason.to_string()),
        })
    }
}
