use reqwest::Method;

use super::ServiceError;
use crate::client::ApiClient;

/// Text-to-PDF rendering, used to export the generated documents.
#[derive(Debug, Clone)]
pub struct PdfService {
    client: ApiClient,
}

impl PdfService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn render(&self, text: &str, filename: &str) -> Result<Vec<u8>, ServiceError> {
        tracing::debug!("Rendering {} to PDF ({} chars)", filename, text.len());
        let response = self
            .client
            .request(Method::POST, "/generate-pdf")
            .json(&serde_json::json!({
                "text": text,
                "filename": filename,
            }))
            .send()
            .await?;
        Ok(self.client.bytes(response).await?)
    }
}
