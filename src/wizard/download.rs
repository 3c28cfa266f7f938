use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use thiserror::Error;

use super::{Cancelled, PageScope, Step, StepOutcome, Wizard, WizardError};
use crate::models::{DocumentKind, Documents, IdeaId};
use crate::services::{ServiceError, Services};

/// One download button on the download page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadKey {
    Document(DocumentKind),
    Image(usize),
    Rfp,
}

impl fmt::Display for DownloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(kind) => write!(f, "{} document", kind),
            Self::Image(index) => write!(f, "image {}", index + 1),
            Self::Rfp => f.write_str("RFP"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Download of {0} already in progress")]
    InProgress(DownloadKey),

    #[error("Document content not found: {0}")]
    EmptyDocument(DocumentKind),

    #[error("No image at position {0}")]
    NoSuchImage(usize),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Failed to save download: {0}")]
    Io(#[from] std::io::Error),
}

pub(super) type InFlight = Arc<Mutex<HashSet<DownloadKey>>>;

/// Marks a key as downloading until dropped.
struct InFlightGuard {
    in_flight: InFlight,
    key: DownloadKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .expect("download state lock poisoned")
            .remove(&self.key);
    }
}

/// The download page: export documents as PDF, save generated images and
/// fetch the RFP.
///
/// Every button tracks its own in-flight state, so any number of different
/// downloads can run at once; only a second click on a busy button is refused.
/// All handles opened on one visit of the page share that state.
#[derive(Clone)]
pub struct DownloadPage {
    services: Services,
    documents: Documents,
    image_urls: Vec<String>,
    idea_id: Option<IdeaId>,
    out_dir: PathBuf,
    scope: PageScope,
    in_flight: InFlight,
}

impl DownloadPage {
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Every button on the page: the three documents, each image, the RFP.
    pub fn keys(&self) -> Vec<DownloadKey> {
        DocumentKind::ALL
            .into_iter()
            .map(DownloadKey::Document)
            .chain((0..self.image_urls.len()).map(DownloadKey::Image))
            .chain(std::iter::once(DownloadKey::Rfp))
            .collect()
    }

    pub fn is_in_flight(&self, key: DownloadKey) -> bool {
        self.in_flight
            .lock()
            .expect("download state lock poisoned")
            .contains(&key)
    }

    fn begin(&self, key: DownloadKey) -> Result<InFlightGuard, DownloadError> {
        let mut in_flight = self.in_flight.lock().expect("download state lock poisoned");
        if !in_flight.insert(key) {
            return Err(DownloadError::InProgress(key));
        }
        Ok(InFlightGuard {
            in_flight: self.in_flight.clone(),
            key,
        })
    }

    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
        tokio::fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!("Saved {}", path.display());
        Ok(path)
    }

    pub async fn download(&self, key: DownloadKey) -> Result<PathBuf, DownloadError> {
        match key {
            DownloadKey::Document(kind) => self.download_document(kind).await,
            DownloadKey::Image(index) => self.download_image(index).await,
            DownloadKey::Rfp => self.download_rfp().await,
        }
    }

    /// Press every button at once and wait for all of them. One failure does
    /// not stop the others; each result comes back next to its key, in
    /// [`keys`](Self::keys) order.
    pub async fn download_all(&self) -> Vec<(DownloadKey, Result<PathBuf, DownloadError>)> {
        let keys = self.keys();
        tracing::info!("Starting {} downloads", keys.len());
        join_all(
            keys.into_iter()
                .map(|key| async move { (key, self.download(key).await) }),
        )
        .await
    }

    /// Render one document to PDF through the text-to-PDF service and save
    /// it as `<exportName>.pdf`.
    pub async fn download_document(&self, kind: DocumentKind) -> Result<PathBuf, DownloadError> {
        let text = self.documents.get(kind);
        if text.is_empty() {
            return Err(DownloadError::EmptyDocument(kind));
        }
        let _guard = self.begin(DownloadKey::Document(kind))?;

        let name = kind.export_name();
        let pdf = self.scope.run(self.services.pdf.render(text, name)).await??;
        self.save(&format!("{}.pdf", name), &pdf).await
    }

    /// Save one generated image as `generated_image_<n>.png`, counting from 1.
    pub async fn download_image(&self, index: usize) -> Result<PathBuf, DownloadError> {
        let url = self
            .image_urls
            .get(index)
            .ok_or(DownloadError::NoSuchImage(index))?;
        let _guard = self.begin(DownloadKey::Image(index))?;

        tokio::fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(format!("generated_image_{}.png", index + 1));
        self.scope
            .run(self.services.images.download_image(url, &path))
            .await??;
        tracing::info!("Saved {}", path.display());
        Ok(path)
    }

    /// Generate and save the RFP as `RFP_<idea id>.pdf`.
    pub async fn download_rfp(&self) -> Result<PathBuf, DownloadError> {
        let id = self.idea_id.as_ref().ok_or(ServiceError::MissingIdeaId)?;
        let _guard = self.begin(DownloadKey::Rfp)?;

        let pdf = self
            .scope
            .run(self.services.documents.generate_rfp(id.as_str()))
            .await??;
        self.save(&format!("RFP_{}.pdf", id), &pdf).await
    }
}

impl Wizard {
    /// Open the download page, writing into `out_dir`.
    ///
    /// The page works on a snapshot of the documents and the image URLs
    /// handed over by the image step. Handles opened during one visit share
    /// their in-flight buttons. Downloads are abandoned when the wizard leaves
    /// the page.
    pub fn download_page(&mut self, out_dir: impl Into<PathBuf>) -> Result<DownloadPage, WizardError> {
        self.expect_step(Step::Download)?;
        let handoff = self.image_handoff();
        Ok(DownloadPage {
            services: self.services.clone(),
            documents: self.session.documents().clone(),
            image_urls: handoff.map(|h| h.image_urls.clone()).unwrap_or_default(),
            idea_id: self
                .session
                .current_idea_id()
                .cloned()
                .or_else(|| handoff.map(|h| h.idea_id.clone())),
            out_dir: out_dir.into(),
            scope: self.scope.clone(),
            in_flight: self.current().downloads.clone(),
        })
    }

    /// Move on to the premium offer.
    pub fn continue_to_premium(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Download)?;
        self.navigate(Step::Premium, None);
        Ok(StepOutcome::Advanced(Step::Premium))
    }
}
