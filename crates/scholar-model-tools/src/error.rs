use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} does not fit the target number type")]
    NumConversion(&'static str),
    #[error("stored question options are malformed")]
    Options(#[from] serde_json::Error),
}
