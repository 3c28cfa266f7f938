//! HTTP client shared by every service.
//!
//! Each external collaborator gets its own [`ApiClient`] bound to one base URL.
//! Clients are cheap to clone; clones share the underlying connection pool.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Empty response body")]
    EmptyBody,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => e.status(),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::EmptyBody => None,
        }
    }
}

/// Build the shared reqwest client.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// REST client bound to a single base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for a path relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Build a request for an absolute URL, e.g. a generated image.
    pub fn request_url(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Decode a JSON body, accepting exactly `expected` as the success status.
    pub async fn json_with_status<T: DeserializeOwned>(
        &self,
        response: Response,
        expected: StatusCode,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status == expected {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// Decode a JSON body on any 2xx status.
    pub async fn json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ClientError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// Read a text body on any 2xx status.
    pub async fn text(&self, response: Response) -> Result<String, ClientError> {
        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// Read a non-empty binary body on any 2xx status.
    pub async fn bytes(&self, response: Response) -> Result<Vec<u8>, ClientError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ClientError::EmptyBody);
        }
        Ok(bytes.to_vec())
    }

    /// Check for a 2xx status and discard the body.
    pub async fn empty(&self, response: Response) -> Result<(), ClientError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    async fn status_error(response: Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Request failed with {}: {}", status, body);
        ClientError::UnexpectedStatus { status, body }
    }
}
