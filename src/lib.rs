pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

use std::sync::Arc;

use crate::client::auth::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::services::{
    access_service::AccessService, ai_config_service::AiConfigService,
    application_service::ApplicationService, document_service::DocumentService,
    email_service::EmailService, home_content_service::HomeContentService,
    integration_service::IntegrationService, interview_service::InterviewService,
    matching_service::MatchingService, position_service::PositionService,
    ring_ai_service::RingAiService, selected_candidate_service::SelectedCandidateService,
};
use crate::views::{
    access_control::AccessControl, application_list::ApplicationList,
    interview_scheduler::InterviewScheduler, matching_results::MatchingResults,
    position_manager::PositionManager, selected_candidates::SelectedCandidates,
    settings::SettingsPages, Notifier, Prompter,
};

/// Every service over one shared client, plus the feedback channels the
/// screens report through.
#[derive(Clone)]
pub struct AdminApp {
    pub client: ApiClient,
    pub positions: PositionService,
    pub applications: ApplicationService,
    pub interviews: InterviewService,
    pub matching: MatchingService,
    pub selected_candidates: SelectedCandidateService,
    pub documents: DocumentService,
    pub email: EmailService,
    pub ai_config: AiConfigService,
    pub ring_ai: RingAiService,
    pub integrations: IntegrationService,
    pub home_content: HomeContentService,
    pub access: AccessService,
    pub notifier: Arc<dyn Notifier>,
    pub prompter: Arc<dyn Prompter>,
}

impl AdminApp {
    pub fn new(
        config: &Config,
        tokens: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
        prompter: Arc<dyn Prompter>,
    ) -> Result<Self> {
        let client = ApiClient::new(config, tokens)?;

        Ok(Self {
            positions: PositionService::new(client.clone()),
            applications: ApplicationService::new(client.clone()),
            interviews: InterviewService::new(client.clone()),
            matching: MatchingService::new(client.clone()),
            selected_candidates: SelectedCandidateService::new(client.clone()),
            documents: DocumentService::new(client.clone(), config.max_upload_bytes),
            email: EmailService::new(client.clone()),
            ai_config: AiConfigService::new(client.clone()),
            ring_ai: RingAiService::new(client.clone()),
            integrations: IntegrationService::new(client.clone()),
            home_content: HomeContentService::new(client.clone()),
            access: AccessService::new(client.clone()),
            client,
            notifier,
            prompter,
        })
    }

    /// Token from `API_TOKEN` when given, else the persisted token file.
    pub fn token_store(config: &Config) -> Arc<dyn TokenStore> {
        match &config.api_token {
            Some(token) => Arc::new(MemoryTokenStore::new(Some(token.clone()))),
            None => Arc::new(FileTokenStore::open(config.token_file.clone())),
        }
    }

    pub fn position_manager(&self) -> PositionManager {
        PositionManager::new(self.positions.clone(), self.notifier.clone(), self.prompter.clone())
    }

    pub fn application_list(&self) -> ApplicationList {
        ApplicationList::new(self.applications.clone(), self.notifier.clone())
    }

    pub fn interview_scheduler(&self) -> InterviewScheduler {
        InterviewScheduler::new(
            self.interviews.clone(),
            self.access.clone(),
            self.notifier.clone(),
            self.prompter.clone(),
        )
    }

    pub fn matching_results(&self) -> MatchingResults {
        MatchingResults::new(self.matching.clone(), self.notifier.clone())
    }

    pub fn selected_candidates(&self) -> SelectedCandidates {
        SelectedCandidates::new(
            self.selected_candidates.clone(),
            self.documents.clone(),
            self.notifier.clone(),
            self.prompter.clone(),
        )
    }

    pub fn settings(&self) -> SettingsPages {
        SettingsPages::new(
            self.email.clone(),
            self.ai_config.clone(),
            self.ring_ai.clone(),
            self.integrations.clone(),
            self.home_content.clone(),
            self.notifier.clone(),
            self.prompter.clone(),
        )
    }

    pub fn access_control(&self) -> AccessControl {
        AccessControl::new(self.access.clone(), self.notifier.clone(), self.prompter.clone())
    }
}
