use serde::Deserialize;

use crate::client::{ApiClient, Envelope};
use crate::dto::settings_dto::{SendTestEmailPayload, TemplatePreviewRequest};
use crate::error::Result;
use crate::models::settings::{ConnectionCheck, EmailConfig, EmailPreset, EmailTemplate, TemplatePreview};

/// SMTP settings and the templates used by outgoing mail.
#[derive(Clone)]
pub struct EmailService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PresetPayload {
    List(Vec<EmailPreset>),
    Keyed(std::collections::BTreeMap<String, EmailPreset>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TemplateListPayload {
    Wrapped { templates: Vec<EmailTemplate> },
    Items(Vec<EmailTemplate>),
}

impl EmailService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_config(&self) -> Result<Option<EmailConfig>> {
        self.client.get("email-config").await
    }

    pub async fn create_config(&self, config: &EmailConfig) -> Result<Option<EmailConfig>> {
        self.client.post("email-config", config).await
    }

    pub async fn update_config(&self, config: &EmailConfig) -> Result<Option<EmailConfig>> {
        match &config.id {
            Some(id) => self.client.put(&format!("email-config/{}", id), config).await,
            None => self.client.put("email-config", config).await,
        }
    }

    pub async fn delete_config(&self, id: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&format!("email-config/{}", id))
            .await?;
        Ok(())
    }

    /// Flips the active flag of the stored configuration.
    pub async fn toggle(&self, id: &str) -> Result<Option<EmailConfig>> {
        self.client
            .patch(&format!("email-config/{}/toggle", id), &serde_json::json!({}))
            .await
    }

    pub async fn presets(&self) -> Result<Vec<EmailPreset>> {
        let payload: PresetPayload = self.client.get("email-config/presets").await?;
        Ok(match payload {
            PresetPayload::List(items) => items,
            PresetPayload::Keyed(map) => map
                .into_iter()
                .map(|(key, mut preset)| {
                    if preset.name.is_empty() {
                        preset.name = key;
                    }
                    preset
                })
                .collect(),
        })
    }

    pub async fn test_connection(&self, config: &EmailConfig) -> Result<ConnectionCheck> {
        let envelope = self
            .client
            .post_envelope::<Option<ConnectionCheck>, _>("email-config/test-connection", config)
            .await?;
        Ok(connection_check(envelope))
    }

    pub async fn send_test(&self, payload: &SendTestEmailPayload) -> Result<ConnectionCheck> {
        let envelope = self
            .client
            .post_envelope::<Option<ConnectionCheck>, _>("email-config/send-test", payload)
            .await?;
        Ok(connection_check(envelope))
    }

    pub async fn templates(&self) -> Result<Vec<EmailTemplate>> {
        let payload: TemplateListPayload = self.client.get("email-templates").await?;
        Ok(match payload {
            TemplateListPayload::Wrapped { templates } => templates,
            TemplateListPayload::Items(items) => items,
        })
    }

    pub async fn template(&self, template_type: &str) -> Result<EmailTemplate> {
        self.client.get(&format!("email-templates/{}", template_type)).await
    }

    pub async fn create_template(&self, template: &EmailTemplate) -> Result<Option<EmailTemplate>> {
        self.client.post("email-templates", template).await
    }

    pub async fn update_template(&self, template: &EmailTemplate) -> Result<Option<EmailTemplate>> {
        self.client
            .put(&format!("email-templates/{}", template.template_type), template)
            .await
    }

    pub async fn delete_template(&self, template_type: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&format!("email-templates/{}", template_type))
            .await?;
        Ok(())
    }

    pub async fn reset_template(&self, template_type: &str) -> Result<Option<EmailTemplate>> {
        self.client
            .post(
                &format!("email-templates/{}/reset", template_type),
                &serde_json::json!({}),
            )
            .await
    }

    pub async fn preview(&self, request: &TemplatePreviewRequest) -> Result<TemplatePreview> {
        self.client.post("email-templates/preview", request).await
    }
}

/// Test endpoints report either a data object or only `{success, message}`.
/// A `success` flag inside `data` overrides the top-level one.
pub(crate) fn connection_check(envelope: Envelope<Option<ConnectionCheck>>) -> ConnectionCheck {
    let top_level = envelope
        .raw
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);
    let data_flag = envelope
        .raw
        .get("data")
        .and_then(|d| d.get("success"))
        .and_then(|v| v.as_bool());
    match envelope.data {
        Some(mut check) => {
            check.success = data_flag.unwrap_or(top_level);
            if check.message.is_none() {
                check.message = envelope.message;
            }
            check
        }
        None => ConnectionCheck {
            success: top_level,
            message: envelope.message,
        },
    }
}
