use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("invalid issuer url: {0}")]
    Issuer(#[from] url::ParseError),
    #[error("no key with id {0}")]
    KeyNotFound(String),
    #[error("token header is missing field {0}")]
    MissingField(&'static str),
}
