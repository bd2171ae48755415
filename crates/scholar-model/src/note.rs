use crate::validation::{Validate, ValidationError, require_text};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Note {
    pub id: Uuid,
    pub subject: Uuid,
    #[schema(example = "Algebra")]
    pub title: String,
    /// HTML formatted body
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewNote {
    pub subject: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NoteUpdate {
    /// Moves the note to another subject
    #[serde(default)]
    pub subject: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Validate for NewNote {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}

impl Validate for NoteUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.title {
            Some(title) => require_text("title", title),
            None => Ok(()),
        }
    }
}
