use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three generated documents attached to an idea.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Requirements,
    Technical,
    Lifecycle,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [Self::Requirements, Self::Technical, Self::Lifecycle];

    /// Path segment used by the product-vision API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requirements => "requirements",
            Self::Technical => "technical",
            Self::Lifecycle => "lifecycle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "requirements" => Some(Self::Requirements),
            "technical" => Some(Self::Technical),
            "lifecycle" => Some(Self::Lifecycle),
            _ => None,
        }
    }

    /// Human-readable heading.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Requirements => "User Requirements",
            Self::Technical => "Technical Aspects",
            Self::Lifecycle => "Life Cycle",
        }
    }

    /// Base name for exported files, without extension.
    pub fn export_name(&self) -> &'static str {
        match self {
            Self::Requirements => "userRequirements",
            Self::Technical => "technicalAspects",
            Self::Lifecycle => "lifeCycle",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three document bodies for the current idea. Empty until fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documents {
    pub requirements: String,
    pub technical: String,
    pub lifecycle: String,
}

impl Documents {
    pub fn get(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Requirements => &self.requirements,
            DocumentKind::Technical => &self.technical,
            DocumentKind::Lifecycle => &self.lifecycle,
        }
    }

    pub fn set(&mut self, kind: DocumentKind, text: impl Into<String>) {
        let slot = match kind {
            DocumentKind::Requirements => &mut self.requirements,
            DocumentKind::Technical => &mut self.technical,
            DocumentKind::Lifecycle => &mut self.lifecycle,
        };
        *slot = text.into();
    }

    /// Iterate `(kind, body)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (DocumentKind, &str)> {
        DocumentKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// Strip markdown emphasis and heading markers from generated text.
///
/// The generator answers in loose markdown; only the plain prose is kept.
pub fn normalize_document(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '*' && *c != '#')
        .collect::<String>()
        .trim()
        .to_string()
}
