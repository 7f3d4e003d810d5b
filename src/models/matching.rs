use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{ApplicationSummary, EntityRef, HasId, PositionSummary};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchScores {
    #[serde(alias = "overallScore")]
    pub overall: f64,
    #[serde(alias = "skillsScore", alias = "skillsMatch")]
    pub skills: f64,
    #[serde(alias = "experienceScore", alias = "experienceMatch")]
    pub experience: f64,
    #[serde(alias = "educationScore", alias = "educationMatch")]
    pub education: f64,
    #[serde(alias = "relevanceScore")]
    pub relevance: f64,
}

/// Score card computed by the backend matching service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingResult {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub application: Option<EntityRef<ApplicationSummary>>,
    #[serde(default)]
    pub position: Option<EntityRef<PositionSummary>>,
    #[serde(default, alias = "matchScores")]
    pub scores: MatchScores,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default, alias = "shortlisted")]
    pub is_shortlisted: bool,
    #[serde(default, alias = "createdAt")]
    pub matched_at: Option<DateTime<Utc>>,
}

impl HasId for MatchingResult {
    fn id(&self) -> &str {
        &self.id
    }
}

impl MatchingResult {
    pub fn candidate(&self) -> Option<&ApplicationSummary> {
        self.application.as_ref().and_then(|a| a.populated())
    }

    pub fn position_id(&self) -> Option<&str> {
        self.position.as_ref().map(|p| p.id())
    }

    pub fn position_title(&self) -> Option<&str> {
        self.position
            .as_ref()
            .and_then(|p| p.populated())
            .map(|p| p.title.as_str())
    }
}

/// Client-side filters of the matching results screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingFilter {
    pub position: Option<String>,
    pub min_score: Option<f64>,
    pub shortlisted_only: bool,
}

impl MatchingFilter {
    pub fn matches(&self, result: &MatchingResult) -> bool {
        if let Some(position) = &self.position {
            if result.position_id() != Some(position.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_score {
            if result.scores.overall < min {
                return false;
            }
        }
        !self.shortlisted_only || result.is_shortlisted
    }

    pub fn apply<'a>(&self, results: &'a [MatchingResult]) -> Vec<&'a MatchingResult> {
        results.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Acknowledgement of `POST /ai-matching/match-all`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRunSummary {
    #[serde(alias = "processed")]
    pub total_processed: u64,
    #[serde(alias = "shortlisted")]
    pub shortlisted_count: u64,
    pub failed: u64,
}
