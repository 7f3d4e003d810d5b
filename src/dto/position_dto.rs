use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::position::{JobType, Position, PositionStatus};

/// Create/edit form of the positions screen.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_experience", skip_on_field_errors = false))]
pub struct PositionForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    pub job_type: JobType,
    #[validate(range(min = 0.0, max = 60.0, message = "Minimum experience must be between 0 and 60 years"))]
    pub minimum_experience: f64,
    #[validate(range(min = 0.0, max = 60.0, message = "Relevant experience must be between 0 and 60 years"))]
    pub relevant_experience: f64,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub requirements: Vec<String>,
    pub status: PositionStatus,
}

impl PositionForm {
    pub fn new(title: impl Into<String>, department: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            department: department.into(),
            location: location.into(),
            salary_range: None,
            job_type: JobType::FullTime,
            minimum_experience: 0.0,
            relevant_experience: 0.0,
            description: String::new(),
            requirements: Vec::new(),
            status: PositionStatus::Active,
        }
    }

    /// Trims text fields and drops blank requirement lines.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.department = self.department.trim().to_string();
        self.location = self.location.trim().to_string();
        self.description = self.description.trim().to_string();
        self.salary_range = self
            .salary_range
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self.requirements = self
            .requirements
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        self
    }
}

impl From<&Position> for PositionForm {
    fn from(value: &Position) -> Self {
        Self {
            title: value.title.clone(),
            department: value.department.clone(),
            location: value.location.clone(),
            salary_range: value.salary_range.clone(),
            job_type: value.job_type.unwrap_or(JobType::FullTime),
            minimum_experience: value.minimum_experience.unwrap_or(0.0),
            relevant_experience: value.relevant_experience.unwrap_or(0.0),
            description: value.description.clone().unwrap_or_default(),
            requirements: value.requirements.clone(),
            status: value.status,
        }
    }
}

fn validate_experience(form: &PositionForm) -> Result<(), ValidationError> {
    if form.relevant_experience > form.minimum_experience {
        let mut err = ValidationError::new("relevant_experience");
        err.message = Some(Cow::from(
            "Relevant experience cannot be greater than minimum experience",
        ));
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionStatusPayload {
    pub status: PositionStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForceDeleteQuery {
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn form(min: f64, relevant: f64) -> PositionForm {
        PositionForm {
            minimum_experience: min,
            relevant_experience: relevant,
            description: "Build services".into(),
            ..PositionForm::new("Backend Engineer", "Engineering", "Remote")
        }
    }

    #[test]
    fn relevant_experience_above_minimum_is_rejected() {
        let err = form(2.0, 3.0).validate().unwrap_err();
        assert_eq!(
            Error::from(err).user_message(),
            "Relevant experience cannot be greater than minimum experience"
        );
        assert!(form(3.0, 3.0).validate().is_ok());
        assert!(form(3.0, 2.0).validate().is_ok());
    }

    #[test]
    fn required_fields_are_reported() {
        let mut missing = form(1.0, 0.0);
        missing.title = String::new();
        let err = missing.validate().unwrap_err();
        assert_eq!(Error::from(err).user_message(), "Title is required");
    }

    #[test]
    fn normalization_trims_and_drops_blank_requirements() {
        let mut raw = form(1.0, 1.0);
        raw.title = "  Backend Engineer ".into();
        raw.requirements = vec![" Rust ".into(), "   ".into()];
        raw.salary_range = Some(" ".into());
        let clean = raw.normalized();
        assert_eq!(clean.title, "Backend Engineer");
        assert_eq!(clean.requirements, vec!["Rust".to_string()]);
        assert_eq!(clean.salary_range, None);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(form(3.0, 2.0)).unwrap();
        assert_eq!(json["minimumExperience"], 3.0);
        assert_eq!(json["jobType"], "full-time");
        assert_eq!(json["status"], "active");
        assert!(json.get("salaryRange").is_none());
    }
}
