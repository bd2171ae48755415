use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("quiz {0} not found")]
    NotFound(Uuid),

    #[error("quiz {0} has no questions")]
    Empty(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Conversion(#[from] scholar_model_tools::error::Error),
}
