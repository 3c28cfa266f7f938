use reqwest::Method;

use super::ServiceError;
use crate::client::ApiClient;

/// Innovent website generation.
#[derive(Debug, Clone)]
pub struct WebsiteService {
    client: ApiClient,
}

impl WebsiteService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Generate a website from the idea description. One call, no progress
    /// reporting; the result shape is up to the generator.
    pub async fn generate_website(&self, description: &str) -> Result<serde_json::Value, ServiceError> {
        tracing::info!("Generating website");
        let response = self
            .client
            .request(Method::POST, "/generate")
            .json(&serde_json::json!({ "description": description }))
            .send()
            .await?;
        Ok(self.client.json(response).await?)
    }

    /// Download the archive of the last generated website.
    pub async fn download_website(&self) -> Result<Vec<u8>, ServiceError> {
        let response = self.client.request(Method::GET, "/download-zip").send().await?;
        Ok(self.client.bytes(response).await?)
    }
}
