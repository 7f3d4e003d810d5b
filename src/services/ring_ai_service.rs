use crate::client::ApiClient;
use crate::dto::settings_dto::TestCallPayload;
use crate::error::{Error, Result};
use crate::models::settings::{ConnectionCheck, RingAiConfig};
use crate::services::email_service::connection_check;

/// Voice-screening provider settings.
#[derive(Clone)]
pub struct RingAiService {
    client: ApiClient,
}

impl RingAiService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<RingAiConfig> {
        let config: Option<RingAiConfig> = self.client.get("ring-ai/config").await?;
        Ok(config.unwrap_or_default())
    }

    pub async fn update(&self, config: &RingAiConfig) -> Result<Option<RingAiConfig>> {
        if let (Some(start), Some(end)) = (&config.call_window_start, &config.call_window_end) {
            let start = crate::utils::time::parse_time(start)?;
            let end = crate::utils::time::parse_time(end)?;
            if start >= end {
                return Err(Error::Validation(
                    "Call window start must be before its end".to_string(),
                ));
            }
        }
        self.client.put("ring-ai/config", config).await
    }

    pub async fn test_call(&self, phone_number: &str) -> Result<ConnectionCheck> {
        let phone_number = phone_number.trim();
        if phone_number.is_empty() {
            return Err(Error::Validation("Please enter a phone number".to_string()));
        }
        let envelope = self
            .client
            .post_envelope::<Option<ConnectionCheck>, _>(
                "ring-ai/test-call",
                &TestCallPayload {
                    phone_number: phone_number.to_string(),
                },
            )
            .await?;
        Ok(connection_check(envelope))
    }
}
