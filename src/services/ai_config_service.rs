use crate::client::ApiClient;
use crate::dto::settings_dto::check_ai_config;
use crate::error::Result;
use crate::models::settings::{AiConfig, ConnectionCheck};
use crate::services::email_service::connection_check;

#[derive(Clone)]
pub struct AiConfigService {
    client: ApiClient,
}

impl AiConfigService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<AiConfig> {
        let config: Option<AiConfig> = self.client.get("ai-config").await?;
        Ok(config.unwrap_or_default())
    }

    /// Refuses to send a config whose matching weights do not add up to 100.
    pub async fn update(&self, config: &AiConfig) -> Result<Option<AiConfig>> {
        check_ai_config(config)?;
        self.client.put("ai-config", config).await
    }

    pub async fn test(&self) -> Result<ConnectionCheck> {
        let envelope = self
            .client
            .post_envelope::<Option<ConnectionCheck>, _>("ai-config/test", &serde_json::json!({}))
            .await?;
        Ok(connection_check(envelope))
    }
}
