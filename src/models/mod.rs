//! Domain models for IdeaForge.
//!
//! # Core Concepts
//!
//! - [`Session`]: In-memory wizard state. Created empty, mutated step by step,
//!   never persisted.
//! - [`DocumentKind`]: The three generated documents attached to an idea.
//! - [`Domain`]: The fixed category list an idea is filed under.
//! - [`Idea`]: A read-only idea returned by the nearby-ideas lookup.
//! - [`GeneratedImages`]: Image URLs produced for an idea, handed from the
//!   image step to the download step.

mod document;
mod domain;
mod idea;
mod image;
mod session;

pub use document::*;
pub use domain::*;
pub use idea::*;
pub use image::*;
pub use session::*;
