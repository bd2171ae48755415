use axum::response::{IntoResponse, Response};
use http::StatusCode;
use scholar_model::validation::ValidationError;
use std::error::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum UserError {
    #[error("profile not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::NotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            UserError::Validation(error) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()).into_response(),
            UserError::Database(error) => {
                tracing::error!(error = &error as &dyn Error, "user request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
        }
    }
}
