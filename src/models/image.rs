use serde::{Deserialize, Serialize};

/// Image URLs produced for an idea. Never empty when returned by the image service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImages {
    pub images: Vec<String>,
    pub message: String,
}
