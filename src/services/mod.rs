//! Domain services: thin wrappers turning wizard intents into REST calls.
//!
//! None of these retry. A failed call is reported once and the user decides
//! whether to try again.

mod documents;
mod ideas;
mod images;
mod leads;
mod pdf;
mod website;

pub use documents::DocumentService;
pub use ideas::IdeaService;
pub use images::{ImageService, IMAGE_SAMPLES};
pub use leads::{LeadService, LEAD_UPLOAD_OK};
pub use pdf::PdfService;
pub use website::WebsiteService;

use std::time::Duration;

use thiserror::Error;

use crate::client::{build_http_client, ApiClient, ClientError};
use crate::config::Config;

/// Service-level errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("An idea id is required")]
    MissingIdeaId,

    #[error("A revision prompt is required")]
    EmptyRevisionPrompt,

    #[error("No images received from the server")]
    NoImages,

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        Self::Client(ClientError::Http(e))
    }
}

/// Reject blank idea ids before any request is built.
fn require_idea_id(idea_id: &str) -> Result<&str, ServiceError> {
    let id = idea_id.trim();
    if id.is_empty() {
        return Err(ServiceError::MissingIdeaId);
    }
    Ok(id)
}

/// Every service the wizard needs, wired from one [`Config`].
#[derive(Debug, Clone)]
pub struct Services {
    pub documents: DocumentService,
    pub images: ImageService,
    pub website: WebsiteService,
    pub ideas: IdeaService,
    pub pdf: PdfService,
    pub leads: LeadService,
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        let http = build_http_client(config.request_timeout_secs.map(Duration::from_secs))?;
        let urls = &config.services;
        let images = ApiClient::new(&urls.innovent, http.clone());

        Ok(Self {
            documents: DocumentService::new(ApiClient::new(&urls.product_vision, http.clone())),
            website: WebsiteService::new(images.clone()),
            images: ImageService::new(images),
            ideas: IdeaService::new(
                ApiClient::new(&urls.geofencing, http.clone()),
                config.location.clone(),
            ),
            pdf: PdfService::new(ApiClient::new(&urls.pdf, http.clone())),
            leads: LeadService::new(ApiClient::new(&urls.lead, http)),
        })
    }
}
