use axum::response::{IntoResponse, Response};
use http::StatusCode;
use scholar_db::counter::ChildError;
use scholar_model::validation::ValidationError;
use std::error::Error;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub(crate) enum NoteError {
    #[error("note {0} not found")]
    NotFound(Uuid),

    #[error("subject {0} not found")]
    SubjectNotFound(Uuid),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl From<ChildError> for NoteError {
    fn from(error: ChildError) -> Self {
        match error {
            ChildError::SubjectNotFound(subject_id) => Self::SubjectNotFound(subject_id),
            ChildError::ChildNotFound(_, note_id) => Self::NotFound(note_id),
            ChildError::Db(error) => Self::Database(error),
        }
    }
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        match self {
            NoteError::NotFound(_) | NoteError::SubjectNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            NoteError::Validation(error) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()).into_response(),
            NoteError::Database(error) => {
                tracing::error!(error = &error as &dyn Error, "note request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
        }
    }
}
