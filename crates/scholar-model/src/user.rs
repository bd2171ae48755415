use crate::validation::{Validate, ValidationError, require_text};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use strum::{AsRefStr, Display};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub role: Role,
}

/// The only profile fields a user can change. Role and email stay as registered.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProfileChanges {
    #[serde(default)]
    pub name: Option<String>,
    /// `null` removes the photo
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub photo_url: Option<Option<String>>,
}

impl Validate for ProfileChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }
}

/// Quiz activity of one student as shown to teachers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentOverview {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub quizzes_taken: u32,
    /// Rounded mean score, absent before the first quiz
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_score: Option<u8>,
}
