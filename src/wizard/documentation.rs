use std::collections::BTreeSet;

use futures::future::try_join_all;

use super::{Step, StepOutcome, Wizard, WizardError};
use crate::models::{DocumentKind, Documents};
use crate::services::ServiceError;

const FETCH_FAILED: &str = "Failed to fetch documents";
const REVISE_FAILED: &str = "Failed to revise document";

/// The revision form: which documents to rewrite and how.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionRequest {
    kinds: BTreeSet<DocumentKind>,
    instruction: String,
}

impl RevisionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, kind: DocumentKind, selected: bool) {
        if selected {
            self.kinds.insert(kind);
        } else {
            self.kinds.remove(&kind);
        }
    }

    pub fn select(mut self, kind: DocumentKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        self.instruction = instruction.into();
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.set_instruction(instruction);
        self
    }

    pub fn selected(&self) -> impl Iterator<Item = DocumentKind> + '_ {
        self.kinds.iter().copied()
    }

    pub fn is_selected(&self, kind: DocumentKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Regenerate is enabled only with at least one document selected and a
    /// non-blank instruction.
    pub fn can_regenerate(&self) -> bool {
        !self.kinds.is_empty() && !self.instruction.trim().is_empty()
    }

    fn clear(&mut self) {
        self.kinds.clear();
        self.instruction.clear();
    }
}

impl Wizard {
    /// Load the documentation page.
    ///
    /// Without an idea id this redirects to idea input and fetches nothing.
    /// Otherwise all three documents are fetched concurrently and stored
    /// together; if any fetch fails, none are stored.
    pub async fn enter_documentation(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Documentation)?;
        let Some(id) = self.session.current_idea_id().cloned() else {
            return Ok(self.redirect_to_idea_input());
        };

        let docs = &self.services.documents;
        let fetched = self
            .call(async {
                let (requirements, technical, lifecycle) = futures::try_join!(
                    docs.fetch_document(DocumentKind::Requirements, id.as_str()),
                    docs.fetch_document(DocumentKind::Technical, id.as_str()),
                    docs.fetch_document(DocumentKind::Lifecycle, id.as_str()),
                )?;
                Ok::<_, ServiceError>(Documents {
                    requirements,
                    technical,
                    lifecycle,
                })
            })
            .await;

        match fetched {
            Ok(documents) => {
                self.session.set_documents(documents);
                Ok(StepOutcome::Stayed)
            }
            Err(e) => Err(self.fail(e, FETCH_FAILED)),
        }
    }

    /// Revise every selected document with the same instruction.
    ///
    /// One revision call per selected kind, all concurrent. Only the selected
    /// documents are replaced, and only if every call succeeds. On success the
    /// form is cleared.
    pub async fn regenerate(&mut self, request: &mut RevisionRequest) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Documentation)?;
        if !request.can_regenerate() {
            let err = WizardError::Validation(
                "Select at least one document and describe the changes".to_string(),
            );
            return Err(self.fail(err, REVISE_FAILED));
        }
        let Some(id) = self.session.current_idea_id().cloned() else {
            return Ok(self.redirect_to_idea_input());
        };

        let docs = &self.services.documents;
        let id = id.as_str();
        let instruction = request.instruction();
        let revisions = request.selected().map(|kind| async move {
            let text = docs.revise_document(kind, id, instruction).await?;
            Ok::<_, ServiceError>((kind, text))
        });
        let revised = self.call(try_join_all(revisions)).await;

        match revised {
            Ok(revised) => {
                for (kind, text) in revised {
                    self.session.set_document(kind, text);
                }
                request.clear();
                Ok(StepOutcome::Stayed)
            }
            Err(e) => Err(self.fail(e, REVISE_FAILED)),
        }
    }

    /// Move on to image generation.
    pub fn continue_to_images(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Documentation)?;
        self.navigate(Step::GenerateImages, None);
        Ok(StepOutcome::Advanced(Step::GenerateImages))
    }
}
