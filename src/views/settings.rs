use std::sync::Arc;

use super::{toast_err, DialogResult, Notifier, Prompter};
use crate::dto::settings_dto::{check_ai_config, SendTestEmailPayload, TemplatePreviewRequest};
use crate::error::{Error, Result};
use crate::models::settings::{
    AiConfig, ConnectionCheck, EmailConfig, EmailPreset, EmailTemplate, HomeContent,
    IntegrationConfig, RingAiConfig, TemplatePreview,
};
use crate::services::ai_config_service::AiConfigService;
use crate::services::email_service::EmailService;
use crate::services::home_content_service::HomeContentService;
use crate::services::integration_service::IntegrationService;
use crate::services::ring_ai_service::RingAiService;

/// The configuration screens. Saves toast on success; test actions toast
/// the backend verdict as success or error.
pub struct SettingsPages {
    email: EmailService,
    ai: AiConfigService,
    ring_ai: RingAiService,
    integrations: IntegrationService,
    home: HomeContentService,
    notifier: Arc<dyn Notifier>,
    prompter: Arc<dyn Prompter>,
}

impl SettingsPages {
    pub fn new(
        email: EmailService,
        ai: AiConfigService,
        ring_ai: RingAiService,
        integrations: IntegrationService,
        home: HomeContentService,
        notifier: Arc<dyn Notifier>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            email,
            ai,
            ring_ai,
            integrations,
            home,
            notifier,
            prompter,
        }
    }

    fn report_check(&self, check: ConnectionCheck, fallback_ok: &str, fallback_err: &str) -> ConnectionCheck {
        if check.success {
            self.notifier
                .success(check.message.as_deref().unwrap_or(fallback_ok));
        } else {
            self.notifier
                .error(check.message.as_deref().unwrap_or(fallback_err));
        }
        check
    }

    // Email

    pub async fn email_config(&self) -> Result<Option<EmailConfig>> {
        toast_err(&*self.notifier, self.email.get_config().await)
    }

    pub async fn email_presets(&self) -> Result<Vec<EmailPreset>> {
        toast_err(&*self.notifier, self.email.presets().await)
    }

    /// Creates the configuration when it has no id yet, updates it otherwise.
    pub async fn save_email_config(&self, config: &EmailConfig) -> Result<()> {
        if config.host.trim().is_empty() || config.port == 0 {
            let err = Error::Validation("SMTP host and port are required".to_string());
            return toast_err(&*self.notifier, Err(err));
        }
        if config.id.is_some() {
            toast_err(&*self.notifier, self.email.update_config(config).await)?;
        } else {
            toast_err(&*self.notifier, self.email.create_config(config).await)?;
        }
        self.notifier.success("Email configuration saved successfully");
        Ok(())
    }

    pub async fn delete_email_config(&self, id: &str) -> Result<bool> {
        if let DialogResult::Dismissed = self
            .prompter
            .confirm("Are you sure you want to delete this email configuration?")?
        {
            return Ok(false);
        }
        toast_err(&*self.notifier, self.email.delete_config(id).await)?;
        self.notifier.success("Email configuration deleted");
        Ok(true)
    }

    pub async fn toggle_email_config(&self, id: &str) -> Result<()> {
        let updated = toast_err(&*self.notifier, self.email.toggle(id).await)?;
        match updated {
            Some(config) if !config.is_active => self.notifier.success("Email configuration deactivated"),
            _ => self.notifier.success("Email configuration activated"),
        }
        Ok(())
    }

    pub async fn test_email_connection(&self, config: &EmailConfig) -> Result<ConnectionCheck> {
        let check = toast_err(&*self.notifier, self.email.test_connection(config).await)?;
        Ok(self.report_check(check, "SMTP connection successful", "SMTP connection failed"))
    }

    pub async fn send_test_email(&self, to: &str) -> Result<ConnectionCheck> {
        let payload = toast_err(&*self.notifier, SendTestEmailPayload::new(to))?;
        let check = toast_err(&*self.notifier, self.email.send_test(&payload).await)?;
        Ok(self.report_check(check, "Test email sent successfully", "Failed to send test email"))
    }

    pub async fn email_templates(&self) -> Result<Vec<EmailTemplate>> {
        toast_err(&*self.notifier, self.email.templates().await)
    }

    pub async fn email_template(&self, template_type: &str) -> Result<EmailTemplate> {
        toast_err(&*self.notifier, self.email.template(template_type).await)
    }

    pub async fn save_email_template(&self, template: &EmailTemplate, is_new: bool) -> Result<()> {
        if template.subject.trim().is_empty() || template.body.trim().is_empty() {
            let err = Error::Validation("Subject and content are required".to_string());
            return toast_err(&*self.notifier, Err(err));
        }
        if is_new {
            toast_err(&*self.notifier, self.email.create_template(template).await)?;
        } else {
            toast_err(&*self.notifier, self.email.update_template(template).await)?;
        }
        self.notifier.success("Email template saved successfully");
        Ok(())
    }

    pub async fn delete_email_template(&self, template_type: &str) -> Result<bool> {
        if let DialogResult::Dismissed = self
            .prompter
            .confirm("Are you sure you want to delete this template?")?
        {
            return Ok(false);
        }
        toast_err(&*self.notifier, self.email.delete_template(template_type).await)?;
        self.notifier.success("Email template deleted");
        Ok(true)
    }

    pub async fn reset_email_template(&self, template_type: &str) -> Result<bool> {
        if let DialogResult::Dismissed = self
            .prompter
            .confirm("Reset this template to its default content?")?
        {
            return Ok(false);
        }
        toast_err(&*self.notifier, self.email.reset_template(template_type).await)?;
        self.notifier.success("Template reset to default");
        Ok(true)
    }

    pub async fn preview_email_template(&self, request: &TemplatePreviewRequest) -> Result<TemplatePreview> {
        toast_err(&*self.notifier, self.email.preview(request).await)
    }

    // AI

    pub async fn ai_config(&self) -> Result<AiConfig> {
        toast_err(&*self.notifier, self.ai.get().await)
    }

    /// Blocked locally unless the matching weights add up to 100.
    pub async fn save_ai_config(&self, config: &AiConfig) -> Result<()> {
        toast_err(&*self.notifier, check_ai_config(config))?;
        toast_err(&*self.notifier, self.ai.update(config).await)?;
        self.notifier.success("AI configuration saved successfully");
        Ok(())
    }

    pub async fn test_ai(&self) -> Result<ConnectionCheck> {
        let check = toast_err(&*self.notifier, self.ai.test().await)?;
        Ok(self.report_check(check, "AI connection successful", "AI connection failed"))
    }

    // Ring AI

    pub async fn ring_ai_config(&self) -> Result<RingAiConfig> {
        toast_err(&*self.notifier, self.ring_ai.get().await)
    }

    pub async fn save_ring_ai_config(&self, config: &RingAiConfig) -> Result<()> {
        toast_err(&*self.notifier, self.ring_ai.update(config).await)?;
        self.notifier.success("Ring AI configuration saved successfully");
        Ok(())
    }

    pub async fn ring_ai_test_call(&self, phone_number: &str) -> Result<ConnectionCheck> {
        let check = toast_err(&*self.notifier, self.ring_ai.test_call(phone_number).await)?;
        Ok(self.report_check(check, "Test call initiated", "Test call failed"))
    }

    // Integrations

    pub async fn integrations(&self) -> Result<IntegrationConfig> {
        toast_err(&*self.notifier, self.integrations.get().await)
    }

    pub async fn save_integrations(&self, config: &IntegrationConfig) -> Result<()> {
        toast_err(&*self.notifier, self.integrations.update(config).await)?;
        self.notifier.success("Integration settings saved successfully");
        Ok(())
    }

    pub async fn integration_test_email(&self, to: &str) -> Result<ConnectionCheck> {
        let payload = toast_err(&*self.notifier, SendTestEmailPayload::new(to))?;
        let check = toast_err(&*self.notifier, self.integrations.test_email(&payload).await)?;
        Ok(self.report_check(check, "Test email sent successfully", "Failed to send test email"))
    }

    pub async fn google_auth_url(&self) -> Result<url::Url> {
        toast_err(&*self.notifier, self.integrations.google_auth_url().await)
    }

    pub async fn google_callback(&self, code: &str) -> Result<IntegrationConfig> {
        let config = toast_err(&*self.notifier, self.integrations.google_callback(code).await)?;
        self.notifier.success("Google Calendar connected successfully");
        Ok(config)
    }

    // Home page

    pub async fn home_content(&self) -> Result<HomeContent> {
        toast_err(&*self.notifier, self.home.get().await)
    }

    pub async fn save_home_content(&self, content: &HomeContent) -> Result<()> {
        toast_err(&*self.notifier, self.home.update(content).await)?;
        self.notifier.success("Home page content saved successfully");
        Ok(())
    }

    pub async fn reset_home_content(&self) -> Result<Option<HomeContent>> {
        if let DialogResult::Dismissed = self
            .prompter
            .confirm("Reset home page content to defaults?")?
        {
            return Ok(None);
        }
        let content = toast_err(&*self.notifier, self.home.reset().await)?;
        self.notifier.success("Home page content reset to defaults");
        Ok(Some(content))
    }
}
