use serde::Deserialize;

use crate::client::ApiClient;
use crate::dto::settings_dto::{GoogleCallbackPayload, SendTestEmailPayload};
use crate::error::{Error, Result};
use crate::models::settings::{ConnectionCheck, IntegrationConfig};
use crate::services::email_service::connection_check;

#[derive(Clone)]
pub struct IntegrationService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUrl {
    #[serde(alias = "url", alias = "authorizationUrl")]
    auth_url: String,
}

impl IntegrationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<IntegrationConfig> {
        let config: Option<IntegrationConfig> = self.client.get("integrations/config").await?;
        Ok(config.unwrap_or_default())
    }

    pub async fn update(&self, config: &IntegrationConfig) -> Result<Option<IntegrationConfig>> {
        self.client.put("integrations/config", config).await
    }

    pub async fn test_email(&self, payload: &SendTestEmailPayload) -> Result<ConnectionCheck> {
        let envelope = self
            .client
            .post_envelope::<Option<ConnectionCheck>, _>("integrations/test-email", payload)
            .await?;
        Ok(connection_check(envelope))
    }

    /// Consent URL for connecting Google Calendar. The OAuth dance happens in
    /// the browser; this client only hands the URL over.
    pub async fn google_auth_url(&self) -> Result<url::Url> {
        let AuthUrl { auth_url } = self.client.get("integrations/google/auth").await?;
        Ok(url::Url::parse(&auth_url)?)
    }

    pub async fn google_callback(&self, code: &str) -> Result<IntegrationConfig> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::Validation("Authorization code is required".to_string()));
        }
        self.client
            .post::<Option<serde_json::Value>, _>(
                "integrations/google/callback",
                &GoogleCallbackPayload {
                    code: code.to_string(),
                },
            )
            .await?;
        self.get().await
    }
}
