use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::ServiceError;
use crate::client::ApiClient;

/// Body the deployer answers with when a spreadsheet was stored.
pub const LEAD_UPLOAD_OK: &str = "File saved successfully";

/// Lead-form deployer: takes a spreadsheet of fields, publishes a form.
#[derive(Debug, Clone)]
pub struct LeadService {
    client: ApiClient,
}

impl LeadService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Upload a spreadsheet as multipart field `file`.
    pub async fn upload_sheet(&self, path: &Path) -> Result<(), ServiceError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "leads.xlsx".to_string());
        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(spreadsheet_mime(path))?;

        tracing::info!("Uploading lead sheet {}", file_name);
        let response = self
            .client
            .request(Method::POST, "/postExcel")
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        let body = self.client.text(response).await?;
        if body.trim().trim_matches('"') != LEAD_UPLOAD_OK {
            return Err(ServiceError::Rejected(body));
        }
        Ok(())
    }

    /// Generate the lead form from the last uploaded sheet.
    pub async fn generate_form(&self) -> Result<String, ServiceError> {
        tracing::info!("Generating lead form");
        let response = self.client.request(Method::POST, "/generate").send().await?;
        let body = self.client.text(response).await?;
        if body.trim().is_empty() {
            return Err(ServiceError::Rejected("empty response".to_string()));
        }
        Ok(body)
    }
}

fn spreadsheet_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xls") => "application/vnd.ms-excel",
        _ => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    }
}
