//! The idea-to-product wizard.
//!
//! # Flow
//!
//! ```text
//! Splash → Login → IdeaInput → Documentation → GenerateImages → Download
//!        → Premium → Success → WebsiteGeneration | LeadGeneration → Explore
//! ```
//!
//! Each step is a group of operations on [`Wizard`]. An operation is only
//! valid on its own step. Forward navigation happens only when the operation
//! succeeds; on failure the wizard stays put and records an inline message
//! (see [`Wizard::inline_error`]).
//!
//! Steps that talk to the backend about an idea need the id issued by the
//! idea submission. Without one they redirect to [`Step::IdeaInput`] instead
//! of calling out.

mod documentation;
mod download;
mod idea;
mod images;
mod intro;
mod premium;
mod scope;

pub use documentation::RevisionRequest;
pub use download::{DownloadError, DownloadKey, DownloadPage};
pub use intro::{LOGIN_DELAY, SPLASH_DURATION};
pub use scope::{Cancelled, PageScope};

use std::fmt;
use std::future::Future;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::models::{IdeaId, Session};
use crate::services::{ServiceError, Services};
use download::InFlight;

/// One page of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Splash,
    Login,
    IdeaInput,
    Documentation,
    GenerateImages,
    Download,
    Premium,
    Success,
    WebsiteGeneration,
    LeadGeneration,
    Explore,
}

impl Step {
    /// Route the page is served under.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Splash => "/",
            Self::Login => "/login",
            Self::IdeaInput => "/idea",
            Self::Documentation => "/documentation",
            Self::GenerateImages => "/generate-images",
            Self::Download => "/download",
            Self::Premium => "/premium",
            Self::Success => "/success",
            Self::WebsiteGeneration => "/website-generation",
            Self::LeadGeneration => "/lead-generation",
            Self::Explore => "/explore",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Splash),
            "/login" => Some(Self::Login),
            "/idea" => Some(Self::IdeaInput),
            "/documentation" => Some(Self::Documentation),
            "/generate-images" => Some(Self::GenerateImages),
            "/download" => Some(Self::Download),
            "/premium" => Some(Self::Premium),
            "/success" => Some(Self::Success),
            "/website-generation" => Some(Self::WebsiteGeneration),
            "/lead-generation" => Some(Self::LeadGeneration),
            "/explore" => Some(Self::Explore),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of a step operation that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved forward to the given step.
    Advanced(Step),
    /// A precondition was missing; sent back to the given step.
    Redirected(Step),
    /// Done, still on the same step.
    Stayed,
}

/// Wizard errors.
///
/// None of these are fatal. The wizard stays on its current step and the
/// operation can be invoked again.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{0}")]
    Validation(String),

    #[error("Operation belongs to {expected}, wizard is on {actual}")]
    WrongStep { expected: Step, actual: Step },

    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Image URLs passed from the image step to the download step.
///
/// This rides along with the navigation, not in the session, and is gone once
/// the user moves past the download page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandoff {
    pub image_urls: Vec<String>,
    pub idea_id: IdeaId,
}

#[derive(Debug)]
struct NavEntry {
    step: Step,
    handoff: Option<ImageHandoff>,
    /// Downloads running on this visit, shared by every page handle.
    downloads: InFlight,
}

impl NavEntry {
    fn new(step: Step, handoff: Option<ImageHandoff>) -> Self {
        Self {
            step,
            handoff,
            downloads: InFlight::default(),
        }
    }
}

/// Drives a [`Session`] through the wizard steps.
pub struct Wizard {
    session: Session,
    services: Services,
    history: Vec<NavEntry>,
    scope: PageScope,
    inline_error: Option<String>,
    lead_sheet_uploaded: bool,
}

impl Wizard {
    /// Start a fresh wizard on the splash screen with an empty session.
    pub fn new(services: Services) -> Self {
        Self::with_session(services, Session::new())
    }

    pub fn with_session(services: Services, session: Session) -> Self {
        Self {
            session,
            services,
            history: vec![NavEntry::new(Step::Splash, None)],
            scope: PageScope::new(),
            inline_error: None,
            lead_sheet_uploaded: false,
        }
    }

    pub fn step(&self) -> Step {
        self.current().step
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Every step visited, in order, starting with the splash screen.
    pub fn history(&self) -> Vec<Step> {
        self.history.iter().map(|e| e.step).collect()
    }

    /// Message to show on the current page after a failed operation.
    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    /// Image URLs handed to the current page, if any.
    pub fn image_handoff(&self) -> Option<&ImageHandoff> {
        self.current().handoff.as_ref()
    }

    /// Token that abandons the current page. Requests the page has in flight
    /// are dropped and their results discarded. The wizard stays on the step;
    /// the next operation there starts over with a fresh scope.
    pub fn page_cancel_handle(&self) -> CancellationToken {
        self.scope.token()
    }

    /// Jump straight to a step, as when a route is opened directly.
    /// Steps guard their own preconditions on entry.
    pub fn open(&mut self, step: Step) {
        self.navigate(step, None);
    }

    fn current(&self) -> &NavEntry {
        // history always holds at least the entry it was created with
        &self.history[self.history.len() - 1]
    }

    fn navigate(&mut self, step: Step, handoff: Option<ImageHandoff>) {
        tracing::info!("Navigating {} -> {}", self.step(), step);
        self.scope.cancel();
        self.scope = PageScope::new();
        self.inline_error = None;
        self.history.push(NavEntry::new(step, handoff));
    }

    /// Return to the previous page, restoring what was handed to it.
    fn go_back(&mut self) -> Step {
        let (step, handoff) = match self.history.len() {
            0 | 1 => (Step::Splash, None),
            n => {
                let previous = &self.history[n - 2];
                (previous.step, previous.handoff.clone())
            }
        };
        self.navigate(step, handoff);
        step
    }

    /// Run a service call inside the current page's scope.
    async fn call<F, T>(&self, fut: F) -> Result<T, WizardError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        Ok(self.scope.run(fut).await??)
    }

    /// Guard an operation to its step. An abandoned page gets a new scope
    /// here, so it can be retried without leaving.
    fn expect_step(&mut self, expected: Step) -> Result<(), WizardError> {
        let actual = self.step();
        if actual != expected {
            return Err(WizardError::WrongStep { expected, actual });
        }
        if self.scope.is_cancelled() {
            tracing::debug!("{} was abandoned, starting a new scope", actual);
            self.scope = PageScope::new();
        }
        Ok(())
    }

    /// Send the user back to idea input because no idea id is on record.
    fn redirect_to_idea_input(&mut self) -> StepOutcome {
        tracing::warn!("No idea id in session on {}, redirecting", self.step());
        self.navigate(Step::IdeaInput, None);
        StepOutcome::Redirected(Step::IdeaInput)
    }

    /// Record a failure for the current page and hand the error back.
    ///
    /// Validation errors are shown verbatim; backend failures get the page's
    /// generic message. Cancelled requests belong to a page that is gone and
    /// leave nothing behind.
    fn fail(&mut self, err: WizardError, generic: &str) -> WizardError {
        match &err {
            WizardError::Validation(msg) => self.inline_error = Some(msg.clone()),
            WizardError::Cancelled(_) => {
                tracing::debug!("Dropped result of an abandoned page");
            }
            WizardError::WrongStep { .. } => {}
            WizardError::Service(e) => {
                tracing::warn!("{} failed on {}: {}", generic, self.step(), e);
                self.inline_error = Some(generic.to_string());
            }
        }
        err
    }
}
