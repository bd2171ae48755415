use crate::openai::error::OpenAiError;
use scholar_model::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request itself was rejected before contacting the model
    #[error(transparent)]
    Request(ValidationError),

    #[error(transparent)]
    OpenAi(#[from] OpenAiError),

    #[error("generated draft is unusable: {0}")]
    InvalidDraft(String),
}

impl From<async_openai::error::OpenAIError> for GenerateError {
    fn from(error: async_openai::error::OpenAIError) -> Self {
        Self::OpenAi(error.into())
    }
}
