use sea_orm::{DbErr, TransactionError};
use std::error::Error;

pub trait TransactionResultExt<T, E> {
    /// Merges a failure to run the transaction into the error type of its body.
    fn flatten_res(self) -> Result<T, E>;

    /// Logs a failed transaction body before the error is passed on.
    #[must_use]
    fn log_failure(self, action: &'static str) -> Self;
}

impl<T, E> TransactionResultExt<T, E> for Result<T, TransactionError<E>>
where
    E: From<DbErr> + Error + 'static,
{
    fn flatten_res(self) -> Result<T, E> {
        self.map_err(|err| match err {
            TransactionError::Connection(err) => err.into(),
            TransactionError::Transaction(err) => err,
        })
    }

    fn log_failure(self, action: &'static str) -> Self {
        match &self {
            Err(TransactionError::Transaction(error)) => {
                tracing::warn!(error = error as &dyn Error, action, "transaction rolled back");
            }
            Err(TransactionError::Connection(error)) => {
                tracing::error!(error = error as &dyn Error, action, "failed to run transaction");
            }
            Ok(_) => {}
        }
        self
    }
}
