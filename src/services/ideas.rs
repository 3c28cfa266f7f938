use reqwest::Method;

use super::ServiceError;
use crate::client::ApiClient;
use crate::models::{Coordinates, Domain, Idea};

/// Geofencing lookup of ideas published near a fixed location.
#[derive(Debug, Clone)]
pub struct IdeaService {
    client: ApiClient,
    location: Coordinates,
}

impl IdeaService {
    pub fn new(client: ApiClient, location: Coordinates) -> Self {
        Self { client, location }
    }

    pub fn location(&self) -> &Coordinates {
        &self.location
    }

    /// List ideas near the configured location in `domain`. May be empty.
    pub async fn ideas_nearby(&self, domain: Domain) -> Result<Vec<Idea>, ServiceError> {
        tracing::debug!(
            "Looking up ideas near {},{} in {}",
            self.location.latitude,
            self.location.longitude,
            domain
        );
        let response = self
            .client
            .request(Method::GET, "/ideas-nearby")
            .query(&[
                ("latitude", self.location.latitude.as_str()),
                ("longitude", self.location.longitude.as_str()),
                ("domain", domain.as_str()),
            ])
            .send()
            .await?;
        Ok(self.client.json(response).await?)
    }
}
