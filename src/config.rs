//! Runtime configuration.
//!
//! Values are resolved in three layers: built-in defaults, the JSON file at
//! `<config dir>/ideaforge/config.json`, then environment variables:
//! - `IDEAFORGE_PRODUCT_VISION_URL`
//! - `IDEAFORGE_GEOFENCING_URL`
//! - `IDEAFORGE_INNOVENT_URL`
//! - `IDEAFORGE_PDF_URL`
//! - `IDEAFORGE_LEAD_URL`
//! - `IDEAFORGE_DOWNLOAD_DIR`
//! - `IDEAFORGE_TIMEOUT_SECS`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::Coordinates;

const APP_NAME: &str = "ideaforge";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_PRODUCT_VISION_URL: &str = "https://product-vision-api.onrender.com/api";
pub const DEFAULT_GEOFENCING_URL: &str = "https://geofencingendpts.onrender.com";
pub const DEFAULT_INNOVENT_URL: &str = "https://innovent-endpts.onrender.com";
pub const DEFAULT_PDF_URL: &str = "https://texttopdf-r8d3.onrender.com";
pub const DEFAULT_LEAD_URL: &str = "https://dynamicdeploy-ep5m.onrender.com";

/// Base URLs of the external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceUrls {
    /// Document, revision and RFP generation.
    pub product_vision: String,
    /// Nearby-idea lookup.
    pub geofencing: String,
    /// Image and website generation.
    pub innovent: String,
    /// Text-to-PDF rendering.
    pub pdf: String,
    /// Lead-form deployer.
    pub lead: String,
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            product_vision: DEFAULT_PRODUCT_VISION_URL.to_string(),
            geofencing: DEFAULT_GEOFENCING_URL.to_string(),
            innovent: DEFAULT_INNOVENT_URL.to_string(),
            pdf: DEFAULT_PDF_URL.to_string(),
            lead: DEFAULT_LEAD_URL.to_string(),
        }
    }
}

impl ServiceUrls {
    /// Point every collaborator at the same base URL. Handy for local stubs.
    pub fn all(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            product_vision: base.clone(),
            geofencing: base.clone(),
            innovent: base.clone(),
            pdf: base.clone(),
            lead: base,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub services: ServiceUrls,
    /// Location used for nearby-idea lookups.
    pub location: Coordinates,
    /// Per-request timeout. `None` leaves requests unbounded; the hosted
    /// generators can take minutes on a cold start.
    pub request_timeout_secs: Option<u64>,
    /// Where downloads are written. Defaults to the user's download folder.
    pub download_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServiceUrls::default(),
            location: Coordinates::default(),
            request_timeout_secs: None,
            download_dir: None,
        }
    }
}

impl Config {
    /// Resolve the configuration: defaults, then the user's config file,
    /// then the environment. A broken file is reported and skipped.
    pub fn load() -> Self {
        let mut config = match Self::default_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file: {:#}", e);
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// `<config dir>/ideaforge/config.json`.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("No config directory on this platform")?;
        Ok(dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Read a config file. A file that does not exist yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("Reading {}", path.display())),
        };
        serde_json::from_str(&content).with_context(|| format!("Parsing {}", path.display()))
    }

    /// Apply environment overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let overrides = [
            ("IDEAFORGE_PRODUCT_VISION_URL", &mut self.services.product_vision),
            ("IDEAFORGE_GEOFENCING_URL", &mut self.services.geofencing),
            ("IDEAFORGE_INNOVENT_URL", &mut self.services.innovent),
            ("IDEAFORGE_PDF_URL", &mut self.services.pdf),
            ("IDEAFORGE_LEAD_URL", &mut self.services.lead),
        ];
        for (key, slot) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }

        if let Some(dir) = lookup("IDEAFORGE_DOWNLOAD_DIR").filter(|v| !v.trim().is_empty()) {
            self.download_dir = Some(PathBuf::from(dir));
        }
        if let Some(secs) = lookup("IDEAFORGE_TIMEOUT_SECS") {
            match secs.trim().parse() {
                Ok(secs) => self.request_timeout_secs = Some(secs),
                Err(_) => tracing::warn!("Ignoring invalid IDEAFORGE_TIMEOUT_SECS: {}", secs),
            }
        }
    }

    /// Write this configuration to `path` as pretty JSON, creating missing
    /// directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("Creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Writing {}", path.display()))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Resolved download directory: configured value, else
    /// `<Downloads>/ideaforge`, else `./ideaforge-output`.
    pub fn resolved_download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.download_dir {
            return dir.clone();
        }
        directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(|d| d.join(APP_NAME)))
            .unwrap_or_else(|| PathBuf::from("ideaforge-output"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn env_overrides_replace_defaults() {
        let env: HashMap<&str, &str> = [
            ("IDEAFORGE_INNOVENT_URL", "http://localhost:9000"),
            ("IDEAFORGE_TIMEOUT_SECS", "30"),
            ("IDEAFORGE_DOWNLOAD_DIR", "/tmp/out"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.services.innovent, "http://localhost:9000");
        assert_eq!(config.services.product_vision, DEFAULT_PRODUCT_VISION_URL);
        assert_eq!(config.request_timeout_secs, Some(30));
        assert_eq!(config.resolved_download_dir(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let mut config = Config::default();
        config.apply_env(|k| (k == "IDEAFORGE_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"services":{"pdf":"http://pdf.local"}}"#).unwrap();
        assert_eq!(config.services.pdf, "http://pdf.local");
        assert_eq!(config.services.geofencing, DEFAULT_GEOFENCING_URL);
        assert_eq!(config.location, Coordinates::bangalore());
    }

    #[test]
    fn missing_file_reads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.services, ServiceUrls::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut config = Config::default();
        config.services.lead = "http://leads.local".to_string();
        config.request_timeout_secs = Some(90);

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.services.lead, "http://leads.local");
        assert_eq!(loaded.request_timeout_secs, Some(90));
        assert_eq!(loaded.location, config.location);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Parsing"));
    }
}
