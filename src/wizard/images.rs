use super::{ImageHandoff, Step, StepOutcome, Wizard, WizardError};

const GENERATE_FAILED: &str = "Failed to generate images. Please try again.";

impl Wizard {
    /// Generate images for the idea and move to the download page, handing
    /// the URLs along with the navigation.
    ///
    /// No images back from the generator counts as a failure: the wizard
    /// stays here.
    pub async fn generate_images(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::GenerateImages)?;
        let (Some(idea_id), Some(domain)) = (
            self.session.current_idea_id().cloned(),
            self.session.selected_domain(),
        ) else {
            return Ok(self.redirect_to_idea_input());
        };

        let generated = self
            .call(
                self.services
                    .images
                    .generate_images(self.session.idea_description(), domain),
            )
            .await;
        let generated = match generated {
            Ok(generated) => generated,
            Err(e) => return Err(self.fail(e, GENERATE_FAILED)),
        };

        tracing::info!("{} ({} images)", generated.message, generated.images.len());
        self.navigate(
            Step::Download,
            Some(ImageHandoff {
                image_urls: generated.images,
                idea_id,
            }),
        );
        Ok(StepOutcome::Advanced(Step::Download))
    }
}
