use crate::client::ApiClient;
use crate::dto::interview_dto::{
    CancelInterviewPayload, CompleteInterviewPayload, ReschedulePayload, ScheduleInterviewPayload,
};
use crate::error::Result;
use crate::models::interview::{
    Interview, InterviewListPayload, InterviewListQuery, InterviewStats, ScheduledInterview,
};

#[derive(Clone)]
pub struct InterviewService {
    client: ApiClient,
}

impl InterviewService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &InterviewListQuery) -> Result<Vec<Interview>> {
        let payload: InterviewListPayload = self.client.get_with_query("interviews", query).await?;
        Ok(payload.into())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Interview> {
        self.client.get(&format!("interviews/{}", id)).await
    }

    pub async fn schedule(&self, payload: &ScheduleInterviewPayload) -> Result<ScheduledInterview> {
        let envelope = self.client.post_envelope::<Interview, _>("interviews", payload).await?;
        let flagged = envelope
            .raw
            .get("meetLinkGenerated")
            .or_else(|| envelope.raw.get("meetingLinkGenerated"))
            .and_then(|v| v.as_bool());
        let meeting_link_generated = flagged.unwrap_or_else(|| {
            envelope
                .data
                .meeting_link
                .as_deref()
                .map(|l| !l.is_empty())
                .unwrap_or(false)
        });
        Ok(ScheduledInterview {
            interview: envelope.data,
            meeting_link_generated,
        })
    }

    pub async fn reschedule(&self, id: &str, payload: &ReschedulePayload) -> Result<Option<Interview>> {
        self.client.put(&format!("interviews/{}", id), payload).await
    }

    pub async fn cancel(&self, id: &str, reason: &str) -> Result<Option<Interview>> {
        self.client
            .put(
                &format!("interviews/{}/cancel", id),
                &CancelInterviewPayload {
                    reason: reason.to_string(),
                },
            )
            .await
    }

    pub async fn complete(&self, id: &str, feedback: &str, rating: u8) -> Result<Option<Interview>> {
        self.client
            .put(
                &format!("interviews/{}/complete", id),
                &CompleteInterviewPayload {
                    feedback: feedback.to_string(),
                    rating,
                },
            )
            .await
    }

    /// Asks the backend to re-send reminder emails; answers with its message.
    pub async fn remind(&self, id: &str) -> Result<Option<String>> {
        let envelope = self
            .client
            .post_envelope::<serde_json::Value, _>(
                &format!("interviews/{}/remind", id),
                &serde_json::json!({}),
            )
            .await?;
        Ok(envelope.message)
    }

    pub async fn stats(&self) -> Result<InterviewStats> {
        self.client.get("interviews/stats").await
    }
}
