use axum::response::{IntoResponse, Response};
use http::StatusCode;
use scholar_core::generate::error::GenerateError;
use std::error::Error;

pub(crate) struct DraftError(pub GenerateError);

impl From<GenerateError> for DraftError {
    fn from(error: GenerateError) -> Self {
        Self(error)
    }
}

impl IntoResponse for DraftError {
    fn into_response(self) -> Response {
        match self.0 {
            GenerateError::Request(error) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()).into_response(),
            error @ (GenerateError::OpenAi(_) | GenerateError::InvalidDraft(_)) => {
                tracing::error!(error = &error as &dyn Error, "draft generation failed");
                (StatusCode::BAD_GATEWAY, "The completion service did not return a usable draft").into_response()
            }
        }
    }
}
