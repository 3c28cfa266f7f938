use std::path::Path;

use reqwest::Method;
use serde::Deserialize;

use super::ServiceError;
use crate::client::{ApiClient, ClientError};
use crate::models::{Domain, GeneratedImages};

/// Number of images requested per generation.
pub const IMAGE_SAMPLES: u32 = 2;

#[derive(Debug, Deserialize)]
struct ImagenResponse {
    #[serde(default)]
    images: Option<Vec<String>>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Innovent image generation, plus plain downloads of the generated files.
#[derive(Debug, Clone)]
pub struct ImageService {
    client: ApiClient,
}

impl ImageService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Generate images for an idea. The domain is folded into the prompt so
    /// the generator sees it. An empty result is an error.
    pub async fn generate_images(
        &self,
        description: &str,
        domain: Domain,
    ) -> Result<GeneratedImages, ServiceError> {
        let prompt = format!("{} project: {}", domain, description);
        tracing::info!("Generating {} images ({})", IMAGE_SAMPLES, domain);

        let response = self
            .client
            .request(Method::POST, "/imagen")
            .json(&serde_json::json!({
                "description": prompt,
                "domain": domain.as_str(),
                "n_samples": IMAGE_SAMPLES,
            }))
            .send()
            .await?;

        let body: ImagenResponse = match self.client.json(response).await {
            Ok(body) => body,
            // Surface the generator's own explanation when it sent one.
            Err(ClientError::UnexpectedStatus { status, body }) => {
                return Err(match serde_json::from_str::<ErrorBody>(&body) {
                    Ok(e) => ServiceError::Rejected(e.message),
                    Err(_) => ClientError::UnexpectedStatus { status, body }.into(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let images = body.images.unwrap_or_default();
        if images.is_empty() {
            tracing::warn!("Image generation returned no images");
            return Err(ServiceError::NoImages);
        }

        Ok(GeneratedImages {
            images,
            message: body
                .message
                .unwrap_or_else(|| "Images generated successfully".to_string()),
        })
    }

    /// Fetch an image by absolute URL and write it to `destination`.
    pub async fn download_image(&self, url: &str, destination: &Path) -> Result<(), ServiceError> {
        tracing::debug!("Downloading image {} to {}", url, destination.display());
        let response = self.client.request_url(Method::GET, url).send().await?;
        let bytes = self.client.bytes(response).await?;
        tokio::fs::write(destination, bytes).await?;
        Ok(())
    }
}
