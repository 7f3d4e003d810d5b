use serde::Serialize;

use crate::client::{ApiClient, Download};
use crate::error::Result;
use crate::models::application::{
    Application, ApplicationListPayload, ApplicationListQuery, ApplicationPage, ApplicationStatus,
    DashboardStats,
};

#[derive(Clone)]
pub struct ApplicationService {
    client: ApiClient,
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: ApplicationStatus,
}

impl ApplicationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn list(&self, query: &ApplicationListQuery) -> Result<ApplicationPage> {
        let payload: ApplicationListPayload = self.client.get_with_query("applications", query).await?;
        Ok(payload.into())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Application> {
        self.client.get(&format!("applications/{}", id)).await
    }

    pub async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<Option<Application>> {
        self.client
            .put(&format!("applications/{}", id), &StatusUpdate { status })
            .await
    }

    pub async fn download_resume(&self, id: &str) -> Result<Download> {
        self.client.download(&format!("applications/{}/resume", id)).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.client.get("applications/stats/dashboard").await
    }
}
