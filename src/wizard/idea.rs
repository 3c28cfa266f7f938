use super::{Step, StepOutcome, Wizard, WizardError};
use crate::models::Domain;

const SUBMIT_FAILED: &str = "Failed to process your request. Please try again.";

impl Wizard {
    /// Submit the idea form.
    ///
    /// Both fields are checked before anything is sent: the description must
    /// be non-blank and the domain one of [`Domain::ALL`]. On success the
    /// description, domain and the backend's idea id are stored together and
    /// the wizard moves to documentation. A failed or abandoned submission
    /// leaves the session as it was.
    pub async fn submit_idea(
        &mut self,
        description: &str,
        domain: &str,
    ) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::IdeaInput)?;

        let description = description.trim();
        if description.is_empty() || domain.trim().is_empty() {
            let err = WizardError::Validation("Please fill in all fields".to_string());
            return Err(self.fail(err, SUBMIT_FAILED));
        }
        let Some(domain) = Domain::from_str(domain) else {
            let err = WizardError::Validation(format!("Unknown domain: {}", domain.trim()));
            return Err(self.fail(err, SUBMIT_FAILED));
        };

        let submitted = self
            .call(self.services.documents.generate_documents(description, domain))
            .await;
        let submission = match submitted {
            Ok(submission) => submission,
            Err(e) => return Err(self.fail(e, SUBMIT_FAILED)),
        };

        self.session.set_idea_description(description);
        self.session.set_selected_domain(Some(domain));
        self.session.set_current_idea_id(Some(submission.id));
        self.navigate(Step::Documentation, None);
        Ok(StepOutcome::Advanced(Step::Documentation))
    }
}
