use serde::{Deserialize, Serialize};

use super::document::{DocumentKind, Documents};
use super::domain::Domain;
use super::idea::IdeaId;

/// The signed-in user. Guests have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

/// In-memory wizard state.
///
/// The session is a plain store: it performs no validation, that is the job of
/// the step writing to it. It is created empty and lives as long as the
/// [`Wizard`](crate::wizard::Wizard) that owns it.
///
/// `current_idea_id` is only ever set from a successful idea submission. Every
/// later step that talks to the backend needs it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    user: Option<User>,
    idea_description: String,
    selected_domain: Option<Domain>,
    current_idea_id: Option<IdeaId>,
    documents: Documents,
    is_premium: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn idea_description(&self) -> &str {
        &self.idea_description
    }

    pub fn set_idea_description(&mut self, description: impl Into<String>) {
        self.idea_description = description.into();
    }

    pub fn selected_domain(&self) -> Option<Domain> {
        self.selected_domain
    }

    pub fn set_selected_domain(&mut self, domain: Option<Domain>) {
        self.selected_domain = domain;
    }

    pub fn current_idea_id(&self) -> Option<&IdeaId> {
        self.current_idea_id.as_ref()
    }

    pub fn set_current_idea_id(&mut self, id: Option<IdeaId>) {
        self.current_idea_id = id;
    }

    pub fn documents(&self) -> &Documents {
        &self.documents
    }

    pub fn set_documents(&mut self, documents: Documents) {
        self.documents = documents;
    }

    pub fn document(&self, kind: DocumentKind) -> &str {
        self.documents.get(kind)
    }

    pub fn set_document(&mut self, kind: DocumentKind, text: impl Into<String>) {
        self.documents.set(kind, text);
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn set_premium(&mut self, premium: bool) {
        self.is_premium = premium;
    }
}
