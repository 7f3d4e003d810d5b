use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::matching::{MatchRunSummary, MatchingResult};

#[derive(Clone)]
pub struct MatchingService {
    client: ApiClient,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionScope<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    position_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultListPayload {
    Wrapped {
        #[serde(alias = "matches", alias = "shortlisted")]
        results: Vec<MatchingResult>,
    },
    Items(Vec<MatchingResult>),
}

impl From<ResultListPayload> for Vec<MatchingResult> {
    fn from(value: ResultListPayload) -> Self {
        match value {
            ResultListPayload::Wrapped { results } => results,
            ResultListPayload::Items(items) => items,
        }
    }
}

impl MatchingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn results(&self, position_id: Option<&str>) -> Result<Vec<MatchingResult>> {
        let payload: ResultListPayload = self
            .client
            .get_with_query("ai-matching/results", &PositionScope { position_id })
            .await?;
        Ok(payload.into())
    }

    pub async fn shortlisted(&self, position_id: Option<&str>) -> Result<Vec<MatchingResult>> {
        let payload: ResultListPayload = self
            .client
            .get_with_query("ai-matching/shortlisted", &PositionScope { position_id })
            .await?;
        Ok(payload.into())
    }

    /// Starts the backend batch job. No progress is streamed back.
    pub async fn match_all(&self, position_id: Option<&str>) -> Result<MatchRunSummary> {
        let summary: Option<MatchRunSummary> = self
            .client
            .post("ai-matching/match-all", &PositionScope { position_id })
            .await?;
        Ok(summary.unwrap_or_default())
    }
}
