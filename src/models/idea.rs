use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier the product-vision backend issues for a submitted idea.
///
/// The backend is not consistent about the JSON type, so both strings and
/// numbers are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdeaId(String);

impl IdeaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IdeaId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number id, got {}",
                other
            ))),
        }
    }
}

/// Response to an idea submission.
///
/// Only `id` is used by the wizard; everything else the backend sends is kept
/// in `extra` for callers that want it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaSubmission {
    pub id: IdeaId,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An idea published near a location, as returned by the geofencing service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Idea {
    pub id: serde_json::Value,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Comma-separated list, see [`Idea::requirement_list`].
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub duration: String,
}

impl Idea {
    pub fn requirement_list(&self) -> Vec<&str> {
        self.requirements
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect()
    }
}

/// Location used for nearby-idea lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    pub fn bangalore() -> Self {
        Self {
            latitude: "12.9716".to_string(),
            longitude: "77.5946".to_string(),
        }
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::bangalore()
    }
}
