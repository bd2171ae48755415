use crate::validation::{Validate, ValidationError, require_text};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Subject {
    pub id: Uuid,
    #[schema(example = "Mathematics")]
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub note_count: u32,
    pub quiz_count: u32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewSubject {
    #[schema(example = "Mathematics")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SubjectUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `null` removes the image
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

impl Validate for NewSubject {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Validate for SubjectUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }
}
