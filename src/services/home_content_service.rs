use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::models::settings::HomeContent;

#[derive(Clone)]
pub struct HomeContentService {
    client: ApiClient,
}

impl HomeContentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<HomeContent> {
        let content: Option<HomeContent> = self.client.get("home-content").await?;
        Ok(content.unwrap_or_default())
    }

    pub async fn update(&self, content: &HomeContent) -> Result<Option<HomeContent>> {
        if content.hero_title.trim().is_empty() {
            return Err(Error::Validation("Hero title is required".to_string()));
        }
        self.client.put("home-content", content).await
    }

    pub async fn reset(&self) -> Result<HomeContent> {
        let content: Option<HomeContent> = self
            .client
            .post("home-content/reset", &serde_json::json!({}))
            .await?;
        match content {
            Some(content) => Ok(content),
            None => self.get().await,
        }
    }
}
