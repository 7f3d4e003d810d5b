use futures::future::try_join_all;
use tracing::info;

use crate::client::ApiClient;
use crate::dto::selection_dto::{
    AddSelectedCandidatePayload, JoiningLetterForm, OfferLetterForm, SelectionStatusPayload,
};
use crate::error::Result;
use crate::models::selected_candidate::{
    SelectedCandidate, SelectedCandidateListPayload, SelectedCandidateQuery, SelectionStatus,
};

#[derive(Clone)]
pub struct SelectedCandidateService {
    client: ApiClient,
}

impl SelectedCandidateService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &SelectedCandidateQuery) -> Result<Vec<SelectedCandidate>> {
        let payload: SelectedCandidateListPayload =
            self.client.get_with_query("selected-candidates", query).await?;
        Ok(payload.into())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<SelectedCandidate> {
        self.client.get(&format!("selected-candidates/{}", id)).await
    }

    pub async fn add(&self, payload: &AddSelectedCandidatePayload) -> Result<Option<SelectedCandidate>> {
        self.client.post("selected-candidates", payload).await
    }

    pub async fn update_status(&self, id: &str, status: SelectionStatus) -> Result<Option<SelectedCandidate>> {
        self.client
            .put(
                &format!("selected-candidates/{}", id),
                &SelectionStatusPayload { status },
            )
            .await
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&format!("selected-candidates/{}", id))
            .await?;
        Ok(())
    }

    pub async fn send_offer(&self, id: &str, offer: &OfferLetterForm) -> Result<()> {
        self.client
            .post::<serde_json::Value, _>(&format!("selected-candidates/{}/send-offer", id), offer)
            .await?;
        Ok(())
    }

    pub async fn send_joining_letter(&self, id: &str, letter: &JoiningLetterForm) -> Result<()> {
        self.client
            .post::<serde_json::Value, _>(
                &format!("selected-candidates/{}/send-joining-letter", id),
                letter,
            )
            .await?;
        Ok(())
    }

    /// One request per candidate, all in flight together. The first failure
    /// fails the whole batch; there is no per-candidate report.
    pub async fn send_offers(&self, ids: &[String], offer: &OfferLetterForm) -> Result<usize> {
        info!("Sending offer letters to {} candidate(s)", ids.len());
        let sends = ids.iter().map(|id| self.send_offer(id, offer));
        let sent = try_join_all(sends).await?;
        Ok(sent.len())
    }
}
