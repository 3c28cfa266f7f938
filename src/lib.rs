//! IdeaForge: turn a product idea into documentation, visuals, an RFP and a
//! website by walking a wizard over a set of hosted generators.
//!
//! - [`models`]: session state and the data the services exchange.
//! - [`services`]: one thin client per external collaborator.
//! - [`wizard`]: the step-by-step flow that ties them together.

pub mod client;
pub mod config;
pub mod models;
pub mod services;
pub mod wizard;

pub use config::Config;
pub use services::Services;
pub use wizard::{Step, StepOutcome, Wizard, WizardError};
