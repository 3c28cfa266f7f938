use reqwest::{header, Method, StatusCode};
use serde::Deserialize;

use super::{require_idea_id, ServiceError};
use crate::client::ApiClient;
use crate::models::{normalize_document, DocumentKind, Domain, IdeaSubmission};

/// Body returned by the document fetch and revision endpoints.
#[derive(Debug, Deserialize)]
struct DocumentResponse {
    #[serde(default)]
    document: Option<String>,
}

/// Product-vision API: idea submission, document generation and RFP rendering.
#[derive(Debug, Clone)]
pub struct DocumentService {
    client: ApiClient,
}

impl DocumentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Submit an idea. The backend answers `201 Created` with the new idea id;
    /// any other status is a failure.
    pub async fn generate_documents(
        &self,
        idea: &str,
        domain: Domain,
    ) -> Result<IdeaSubmission, ServiceError> {
        tracing::info!("Submitting idea ({})", domain);
        let response = self
            .client
            .request(Method::POST, "/user-input")
            .json(&serde_json::json!({
                "idea": idea,
                "domain": domain.as_str(),
            }))
            .send()
            .await?;
        let submission: IdeaSubmission = self
            .client
            .json_with_status(response, StatusCode::CREATED)
            .await?;
        tracing::info!("Idea accepted with id {}", submission.id);
        Ok(submission)
    }

    /// Fetch one generated document, normalized for display.
    pub async fn fetch_document(
        &self,
        kind: DocumentKind,
        idea_id: &str,
    ) -> Result<String, ServiceError> {
        let id = require_idea_id(idea_id)?;
        tracing::debug!("Fetching {} document for idea {}", kind, id);
        let response = self
            .client
            .request(Method::GET, &format!("/generate-document/{}/{}", kind, id))
            .send()
            .await?;
        let body: DocumentResponse = self.client.json_with_status(response, StatusCode::OK).await?;
        Ok(normalize_document(body.document.as_deref().unwrap_or_default()))
    }

    /// Ask the generator to rewrite one document following `revision_prompt`.
    pub async fn revise_document(
        &self,
        kind: DocumentKind,
        idea_id: &str,
        revision_prompt: &str,
    ) -> Result<String, ServiceError> {
        let id = require_idea_id(idea_id)?;
        if revision_prompt.trim().is_empty() {
            return Err(ServiceError::EmptyRevisionPrompt);
        }
        tracing::info!("Revising {} document for idea {}", kind, id);
        let response = self
            .client
            .request(Method::POST, &format!("/revise-document/{}/{}", kind, id))
            .json(&serde_json::json!({ "revisionPrompt": revision_prompt }))
            .send()
            .await?;
        let body: DocumentResponse = self.client.json_with_status(response, StatusCode::OK).await?;
        Ok(normalize_document(body.document.as_deref().unwrap_or_default()))
    }

    /// Render the RFP for an idea and return the PDF bytes.
    ///
    /// Rendering is asynchronous on the backend, so this is two calls: a POST
    /// that kicks off generation, then a GET for the finished file.
    pub async fn generate_rfp(&self, idea_id: &str) -> Result<Vec<u8>, ServiceError> {
        let id = require_idea_id(idea_id)?;
        let path = format!("/generate-rfp/{}", id);

        tracing::info!("Requesting RFP for idea {}", id);
        let response = self
            .client
            .request(Method::POST, &path)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        self.client.empty(response).await?;

        let response = self
            .client
            .request(Method::GET, &path)
            .header(header::ACCEPT, "application/pdf")
            .send()
            .await?;
        let pdf = self.client.bytes(response).await?;
        tracing::info!("RFP for idea {} ready ({} bytes)", id, pdf.len());
        Ok(pdf)
    }
}
