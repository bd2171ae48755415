use crate::user::Role;
use crate::validation::{Validate, ValidationError, require_text};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Token {
    pub access_token: String,
}

/// Profile data supplied when an identity registers.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Signup {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    pub role: Role,
}

impl Validate for Signup {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}
