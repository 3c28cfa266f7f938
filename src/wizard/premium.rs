use std::path::Path;

use super::{Step, StepOutcome, Wizard, WizardError};
use crate::models::{Domain, Idea};

const WEBSITE_FAILED: &str = "Failed to generate website. Please try again.";
const UPLOAD_FAILED: &str = "Failed to upload file. Please try again.";
const LEAD_FORM_FAILED: &str = "Failed to generate form. Please try again.";
const EXPLORE_FAILED: &str = "Failed to fetch ideas. Please try again.";

impl Wizard {
    // ============================================================
    // Premium
    // ============================================================

    /// Unlock premium. Simulated: no payment is taken.
    pub fn purchase_premium(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Premium)?;
        self.session.set_premium(true);
        tracing::info!("Premium unlocked");
        self.navigate(Step::Success, None);
        Ok(StepOutcome::Advanced(Step::Success))
    }

    /// Turn the offer down and go back to where the user came from.
    pub fn decline_premium(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Premium)?;
        Ok(StepOutcome::Redirected(self.go_back()))
    }

    // ============================================================
    // Success: pick a premium feature
    // ============================================================

    pub fn start_website_generation(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Success)?;
        self.navigate(Step::WebsiteGeneration, None);
        Ok(StepOutcome::Advanced(Step::WebsiteGeneration))
    }

    pub fn start_lead_generation(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Success)?;
        self.lead_sheet_uploaded = false;
        self.navigate(Step::LeadGeneration, None);
        Ok(StepOutcome::Advanced(Step::LeadGeneration))
    }

    // ============================================================
    // Website generation
    // ============================================================

    /// Generate a website from the idea description, then go explore.
    /// The call is awaited as a whole; there is no progress reporting.
    pub async fn generate_website(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::WebsiteGeneration)?;
        if self.session.current_idea_id().is_none() {
            return Ok(self.redirect_to_idea_input());
        }

        let generated = self
            .call(
                self.services
                    .website
                    .generate_website(self.session.idea_description()),
            )
            .await;
        if let Err(e) = generated {
            return Err(self.fail(e, WEBSITE_FAILED));
        }

        self.navigate(Step::Explore, None);
        Ok(StepOutcome::Advanced(Step::Explore))
    }

    pub fn skip_to_explore(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::WebsiteGeneration)?;
        self.navigate(Step::Explore, None);
        Ok(StepOutcome::Advanced(Step::Explore))
    }

    // ============================================================
    // Lead generation
    // ============================================================

    /// Upload an Excel sheet (`.xlsx` or `.xls`) describing the lead form.
    pub async fn upload_lead_sheet(&mut self, path: &Path) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::LeadGeneration)?;
        let is_excel = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xls"));
        if !is_excel {
            let err = WizardError::Validation(
                "Please select an Excel file (.xlsx or .xls)".to_string(),
            );
            return Err(self.fail(err, UPLOAD_FAILED));
        }

        if let Err(e) = self.call(self.services.leads.upload_sheet(path)).await {
            self.lead_sheet_uploaded = false;
            return Err(self.fail(e, UPLOAD_FAILED));
        }
        self.lead_sheet_uploaded = true;
        Ok(StepOutcome::Stayed)
    }

    pub fn lead_sheet_uploaded(&self) -> bool {
        self.lead_sheet_uploaded
    }

    /// Publish the lead form built from the uploaded sheet.
    pub async fn generate_lead_form(&mut self) -> Result<String, WizardError> {
        self.expect_step(Step::LeadGeneration)?;
        if !self.lead_sheet_uploaded {
            let err = WizardError::Validation("Please upload a file first".to_string());
            return Err(self.fail(err, LEAD_FORM_FAILED));
        }

        match self.call(self.services.leads.generate_form()).await {
            Ok(form) => Ok(form),
            Err(e) => Err(self.fail(e, LEAD_FORM_FAILED)),
        }
    }

    pub fn finish_leads(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::LeadGeneration)?;
        self.navigate(Step::Explore, None);
        Ok(StepOutcome::Advanced(Step::Explore))
    }

    // ============================================================
    // Explore
    // ============================================================

    /// Ideas published near the configured location in `domain`.
    pub async fn explore_ideas(&mut self, domain: Domain) -> Result<Vec<Idea>, WizardError> {
        self.expect_step(Step::Explore)?;
        match self.call(self.services.ideas.ideas_nearby(domain)).await {
            Ok(ideas) => {
                self.inline_error = None;
                Ok(ideas)
            }
            Err(e) => Err(self.fail(e, EXPLORE_FAILED)),
        }
    }
}
