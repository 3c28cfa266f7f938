use std::fmt;

use serde::{Deserialize, Serialize};

/// The category an idea is filed under.
///
/// Used to bias document and image generation and to filter nearby ideas.
/// Only these six values are accepted; anything else is rejected before a
/// request is made.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Domain {
    #[serde(rename = "Software Technology")]
    SoftwareTechnology,
    #[serde(rename = "Healthcare and Biotech")]
    HealthcareAndBiotech,
    #[serde(rename = "Renewable Energy")]
    RenewableEnergy,
    #[serde(rename = "Financial Services")]
    FinancialServices,
    #[serde(rename = "Advanced Manufacturing")]
    AdvancedManufacturing,
    #[serde(rename = "Artificial Intelligence and Robotics")]
    ArtificialIntelligenceAndRobotics,
}

impl Domain {
    /// Every domain, in the order they are offered to the user.
    pub const ALL: [Domain; 6] = [
        Self::SoftwareTechnology,
        Self::HealthcareAndBiotech,
        Self::RenewableEnergy,
        Self::FinancialServices,
        Self::AdvancedManufacturing,
        Self::ArtificialIntelligenceAndRobotics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoftwareTechnology => "Software Technology",
            Self::HealthcareAndBiotech => "Healthcare and Biotech",
            Self::RenewableEnergy => "Renewable Energy",
            Self::FinancialServices => "Financial Services",
            Self::AdvancedManufacturing => "Advanced Manufacturing",
            Self::ArtificialIntelligenceAndRobotics => "Artificial Intelligence and Robotics",
        }
    }

    /// Parse a domain label. Surrounding whitespace is ignored, case is not.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }

    /// Software ideas get UI mockups; every other domain gets generic viewables.
    pub fn visual_label(&self) -> &'static str {
        match self {
            Self::SoftwareTechnology => "UI Images",
            _ => "Relevant Viewables",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
