use axum::response::{IntoResponse, Response};
use http::StatusCode;
use scholar_model::validation::ValidationError;
use std::error::Error;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub(crate) enum SubjectError {
    #[error("subject {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl IntoResponse for SubjectError {
    fn into_response(self) -> Response {
        match self {
            SubjectError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            SubjectError::Validation(error) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()).into_response(),
            SubjectError::Database(error) => {
                tracing::error!(error = &error as &dyn Error, "subject request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
        }
    }
}
