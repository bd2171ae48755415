use axum::response::{IntoResponse, Response};
use http::StatusCode;
use scholar_core::quiz::error::QuizError as EvaluationError;
use scholar_db::counter::ChildError;
use scholar_model::validation::ValidationError;
use std::error::Error;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub(crate) enum QuizError {
    #[error("quiz {0} not found")]
    NotFound(Uuid),

    #[error("subject {0} not found")]
    SubjectNotFound(Uuid),

    #[error("quiz {0} has no questions")]
    Empty(Uuid),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conversion(#[from] scholar_model_tools::error::Error),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl From<ChildError> for QuizError {
    fn from(error: ChildError) -> Self {
        match error {
            ChildError::SubjectNotFound(subject_id) => Self::SubjectNotFound(subject_id),
            ChildError::ChildNotFound(_, quiz_id) => Self::NotFound(quiz_id),
            ChildError::Db(error) => Self::Database(error),
        }
    }
}

impl From<EvaluationError> for QuizError {
    fn from(error: EvaluationError) -> Self {
        match error {
            EvaluationError::NotFound(quiz_id) => Self::NotFound(quiz_id),
            EvaluationError::Empty(quiz_id) => Self::Empty(quiz_id),
            EvaluationError::Database(error) => Self::Database(error),
            EvaluationError::Conversion(error) => Self::Conversion(error),
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        match self {
            QuizError::NotFound(_) | QuizError::SubjectNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            QuizError::Empty(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response(),
            QuizError::Validation(error) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()).into_response(),
            QuizError::Conversion(error) => {
                tracing::error!(error = &error as &dyn Error, "quiz could not be converted");
                (StatusCode::INTERNAL_SERVER_ERROR, "Malformed quiz").into_response()
            }
            QuizError::Database(error) => {
                tracing::error!(error = &error as &dyn Error, "quiz request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
        }
    }
}
