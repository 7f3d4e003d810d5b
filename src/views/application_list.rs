use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::{toast_err, Notifier, Poller};
use crate::error::Result;
use crate::models::application::{
    Application, ApplicationListQuery, ApplicationPage, ApplicationStatus, DashboardStats,
};
use crate::services::application_service::ApplicationService;
use crate::utils::files::{sanitize_filename, save_to_dir};

/// One application together with file links that open without a session.
#[derive(Debug, Clone)]
pub struct ApplicationDetails {
    pub application: Application,
    pub photo_url: Option<url::Url>,
    pub resume_url: Option<url::Url>,
}

pub struct ApplicationList {
    service: ApplicationService,
    notifier: Arc<dyn Notifier>,
    query: ApplicationListQuery,
    page: ApplicationPage,
}

impl ApplicationList {
    pub fn new(service: ApplicationService, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            query: ApplicationListQuery::default(),
            page: ApplicationPage::default(),
        }
    }

    pub fn page(&self) -> &ApplicationPage {
        &self.page
    }

    pub async fn load(&mut self, query: ApplicationListQuery) -> Result<&ApplicationPage> {
        self.query = query;
        self.refresh().await?;
        Ok(&self.page)
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.page = toast_err(&*self.notifier, self.service.list(&self.query).await)?;
        Ok(())
    }

    pub async fn update_status(&mut self, id: &str, status: ApplicationStatus) -> Result<()> {
        toast_err(&*self.notifier, self.service.update_status(id, status).await)?;
        info!(id, %status, "application status changed");
        self.notifier
            .success(&format!("Application status updated to {}", status));
        if let Some(item) = self.page.items.iter_mut().find(|a| a.id == id) {
            item.status = status;
        }
        Ok(())
    }

    pub async fn details(&self, id: &str) -> Result<ApplicationDetails> {
        let application = toast_err(&*self.notifier, self.service.get_by_id(id).await)?;
        let client = self.service.client();
        let photo_url = application
            .photo
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| client.signed_file_url(p))
            .transpose()?;
        let resume_url = application
            .resume
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| client.signed_file_url(p))
            .transpose()?;
        Ok(ApplicationDetails {
            application,
            photo_url,
            resume_url,
        })
    }

    /// Saves the résumé under `dir` and returns the written path.
    pub async fn download_resume(&self, id: &str, dir: &Path) -> Result<PathBuf> {
        let download = toast_err(&*self.notifier, self.service.download_resume(id).await)?;
        let name = download
            .filename
            .clone()
            .unwrap_or_else(|| format!("resume-{}.pdf", sanitize_filename(id)));
        let path = toast_err(&*self.notifier, save_to_dir(dir, &name, &download.bytes).await)?;
        self.notifier.success("Resume downloaded");
        Ok(path)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        toast_err(&*self.notifier, self.service.dashboard_stats().await)
    }

    /// Re-fetches the current query every `period` and hands each fresh page
    /// to `on_update`. Polling failures are logged and the loop keeps going.
    pub fn watch<F>(&self, period: Duration, on_update: F) -> Poller
    where
        F: Fn(ApplicationPage) + Send + Sync + 'static,
    {
        let service = self.service.clone();
        let query = self.query.clone();
        let on_update = Arc::new(on_update);
        Poller::spawn(period, move || {
            let service = service.clone();
            let query = query.clone();
            let on_update = on_update.clone();
            async move {
                match service.list(&query).await {
                    Ok(page) => on_update(page),
                    Err(err) => warn!(error = %err, "application refresh failed"),
                }
            }
        })
    }
}
