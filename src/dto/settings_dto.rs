use serde::Serialize;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::settings::{AiConfig, MatchingCriteria};
use crate::utils::validation::is_valid_email;

/// Blocks an AI config save unless the four weights add up to 100.
pub fn check_matching_weights(criteria: &MatchingCriteria) -> Result<()> {
    if criteria.weights().iter().any(|w| *w > 100) {
        return Err(Error::Validation(
            "Each matching criteria weight must be between 0 and 100".to_string(),
        ));
    }
    let total = criteria.total();
    if total != 100 {
        return Err(Error::Validation(format!(
            "Matching criteria weights must sum to 100 (currently {})",
            total
        )));
    }
    Ok(())
}

pub fn check_ai_config(config: &AiConfig) -> Result<()> {
    check_matching_weights(&config.matching_criteria)?;
    if config.shortlist_threshold > 100 {
        return Err(Error::Validation(
            "Shortlist threshold must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendTestEmailPayload {
    #[validate(email(message = "Please enter a valid email address"))]
    pub to: String,
}

impl SendTestEmailPayload {
    pub fn new(to: &str) -> Result<Self> {
        let to = to.trim();
        if !is_valid_email(to) {
            return Err(Error::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        let payload = Self { to: to.to_string() };
        payload.validate()?;
        Ok(payload)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreviewRequest {
    #[serde(rename = "type")]
    pub template_type: String,
    pub subject: String,
    pub body: String,
    pub sample_data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleCallbackPayload {
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCallPayload {
    pub phone_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_must_sum_to_exactly_100() {
        let ok = MatchingCriteria {
            skills: 40,
            experience: 30,
            education: 15,
            relevance: 15,
        };
        assert!(check_matching_weights(&ok).is_ok());

        let low = MatchingCriteria { relevance: 10, ..ok };
        assert_eq!(
            check_matching_weights(&low).unwrap_err().user_message(),
            "Matching criteria weights must sum to 100 (currently 95)"
        );
        let high = MatchingCriteria { skills: 50, ..ok };
        assert!(check_matching_weights(&high).is_err());
    }

    #[test]
    fn single_weight_above_hundred_is_rejected() {
        let wrapping = MatchingCriteria {
            skills: u32::MAX,
            experience: 101,
            education: 0,
            relevance: 0,
        };
        assert_eq!(
            check_matching_weights(&wrapping).unwrap_err().user_message(),
            "Each matching criteria weight must be between 0 and 100"
        );
        assert_eq!(wrapping.total(), u64::from(u32::MAX) + 101);
    }

    #[test]
    fn test_email_recipient_validated() {
        assert!(SendTestEmailPayload::new("ops@example.com").is_ok());
        assert!(SendTestEmailPayload::new("ops").is_err());
    }
}
