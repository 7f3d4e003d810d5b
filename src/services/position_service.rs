use serde::Deserialize;

use crate::client::ApiClient;
use crate::dto::position_dto::{ForceDeleteQuery, PositionForm, PositionStatusPayload};
use crate::error::{Error, Result};
use crate::models::position::{Position, PositionStatus};

#[derive(Clone)]
pub struct PositionService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PositionListPayload {
    Wrapped { positions: Vec<Position> },
    Items(Vec<Position>),
}

/// Outcome of a plain delete attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The backend refused because applications still reference the position.
    HasApplications { count: u64, message: String },
}

impl PositionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, status: Option<PositionStatus>) -> Result<Vec<Position>> {
        let payload: PositionListPayload = match status {
            Some(status) => {
                self.client
                    .get_with_query("positions", &[("status", status.as_str())])
                    .await?
            }
            None => self.client.get("positions").await?,
        };
        Ok(match payload {
            PositionListPayload::Wrapped { positions } => positions,
            PositionListPayload::Items(items) => items,
        })
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Position> {
        self.client.get(&format!("positions/{}", id)).await
    }

    /// The backend may answer with the stored record or only an acknowledgement.
    pub async fn create(&self, form: &PositionForm) -> Result<Option<Position>> {
        self.client.post("positions", form).await
    }

    pub async fn update(&self, id: &str, form: &PositionForm) -> Result<Option<Position>> {
        self.client.put(&format!("positions/{}", id), form).await
    }

    pub async fn set_status(&self, id: &str, status: PositionStatus) -> Result<Option<Position>> {
        self.client
            .put(&format!("positions/{}", id), &PositionStatusPayload { status })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome> {
        match self.client.delete::<serde_json::Value>(&format!("positions/{}", id)).await {
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(err) => match applications_blocking_delete(&err) {
                Some(count) => Ok(DeleteOutcome::HasApplications {
                    count,
                    message: err.user_message(),
                }),
                None => Err(err),
            },
        }
    }

    /// Cascading delete: removes the position together with its applications.
    pub async fn force_delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_with_query::<serde_json::Value, _>(
                &format!("positions/{}", id),
                &ForceDeleteQuery { force: true },
            )
            .await?;
        Ok(())
    }
}

fn applications_blocking_delete(err: &Error) -> Option<u64> {
    let details = err.details()?;
    let flagged = details
        .get("hasApplications")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let count = details
        .get("applicationsCount")
        .or_else(|| details.get("applicationCount"))
        .and_then(|v| v.as_u64());
    match (flagged, count) {
        (_, Some(n)) if n > 0 => Some(n),
        (true, _) => Some(count.unwrap_or(0)),
        _ => None,
    }
}
