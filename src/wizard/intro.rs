use std::time::Duration;

use super::{Step, StepOutcome, Wizard, WizardError};
use crate::models::User;

const SPLASH_TEXT: &str = "> Hello I am IdeaForge";
const TYPE_INTERVAL_MS: u64 = 100;
const TYPED_PAUSE_MS: u64 = 1000;
const ERASE_INTERVAL_MS: u64 = 50;
const TAGLINE_MS: u64 = 2000;

/// How long the splash screen plays: the greeting is typed out, held,
/// erased back to the prompt character, then the tagline shows.
pub const SPLASH_DURATION: Duration = Duration::from_millis(
    SPLASH_TEXT.len() as u64 * TYPE_INTERVAL_MS
        + TYPED_PAUSE_MS
        + (SPLASH_TEXT.len() as u64 - 1) * ERASE_INTERVAL_MS
        + TAGLINE_MS,
);

/// Artificial delay before a login is accepted.
pub const LOGIN_DELAY: Duration = Duration::from_secs(1);

impl Wizard {
    /// Play the splash screen, then move to login. Timer driven.
    pub async fn run_splash(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Splash)?;
        self.scope.run(tokio::time::sleep(SPLASH_DURATION)).await?;
        self.navigate(Step::Login, None);
        Ok(StepOutcome::Advanced(Step::Login))
    }

    /// Sign in. There is no real authentication: any non-empty pair is
    /// accepted after [`LOGIN_DELAY`].
    pub async fn login(&mut self, username: &str, password: &str) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Login)?;
        if username.trim().is_empty() || password.is_empty() {
            let err = WizardError::Validation("Please fill in all fields".to_string());
            return Err(self.fail(err, "Invalid credentials"));
        }

        if let Err(e) = self.scope.run(tokio::time::sleep(LOGIN_DELAY)).await {
            return Err(self.fail(e.into(), "Invalid credentials"));
        }
        tracing::info!("Signed in as {}", username.trim());
        self.session.set_user(Some(User {
            name: username.trim().to_string(),
        }));
        self.navigate(Step::IdeaInput, None);
        Ok(StepOutcome::Advanced(Step::IdeaInput))
    }

    /// Skip sign-in. The session keeps no user.
    pub fn continue_as_guest(&mut self) -> Result<StepOutcome, WizardError> {
        self.expect_step(Step::Login)?;
        tracing::info!("Continuing as guest");
        self.navigate(Step::IdeaInput, None);
        Ok(StepOutcome::Advanced(Step::IdeaInput))
    }
}
