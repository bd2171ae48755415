use axum::Json;
use axum::response::{IntoResponse, Response};
use scholar_model::validation::ValidationError;
use sea_orm::DbErr;
use serde_derive::Serialize;
use std::borrow::Cow;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub(crate) enum LoginError {
    #[error("Invalid token data")]
    InvalidTokenData(#[from] std::str::Utf8Error),

    #[error("Token is not a valid identity token")]
    Invalid,

    #[error("No profile exists for this identity")]
    NoProfile,

    #[error("A profile already exists for this identity")]
    AlreadyRegistered,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database Error")]
    DatabaseError(#[from] DbErr),

    #[error(transparent)]
    Auth(#[from] crate::auth::AuthError),
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LoginErrorType {
    InvalidCredentials,
    NoProfile,
    AlreadyRegistered,
    InvalidRequest,
}

pub(crate) trait GetStatusCode {
    fn status_code(&self) -> http::StatusCode;
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorData<T> {
    pub(crate) error: T,
    pub(crate) error_description: Cow<'static, str>,
}

impl<T> ErrorData<T> {
    pub fn new<A: Into<Cow<'static, str>>>(error: T, error_description: A) -> Self {
        Self {
            error,
            error_description: error_description.into(),
        }
    }
}

pub(crate) trait ErrorDataProvider<T: GetStatusCode> {
    fn error_data(self) -> Option<ErrorData<T>>;
}

impl ErrorDataProvider<LoginErrorType> for LoginError {
    fn error_data(self) -> Option<ErrorData<LoginErrorType>> {
        use LoginError::{AlreadyRegistered, Auth, DatabaseError, Invalid, InvalidTokenData, NoProfile, Validation};
        let res = match self {
            InvalidTokenData(_) | Invalid | Auth(crate::auth::AuthError::Unauthorized) => {
                ErrorData::new(LoginErrorType::InvalidCredentials, "invalid token data")
            }
            NoProfile => ErrorData::new(LoginErrorType::NoProfile, "sign up before logging in"),
            AlreadyRegistered => ErrorData::new(LoginErrorType::AlreadyRegistered, "this identity already has a profile"),
            Validation(error) => ErrorData::new(LoginErrorType::InvalidRequest, error.to_string()),
            DatabaseError(_) | Auth(_) => return None,
        };
        Some(res)
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}

impl GetStatusCode for LoginError {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::DatabaseError(_) => http::StatusCode::SERVICE_UNAVAILABLE,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl GetStatusCode for LoginErrorType {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::InvalidCredentials => http::StatusCode::UNAUTHORIZED,
            Self::NoProfile => http::StatusCode::FORBIDDEN,
            Self::AlreadyRegistered => http::StatusCode::CONFLICT,
            Self::InvalidRequest => http::StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

pub(crate) fn error_to_axum_response<E, T>(error: T) -> Response
where
    E: GetStatusCode + serde::Serialize,
    T: GetStatusCode + ErrorDataProvider<E>,
{
    let status_code = GetStatusCode::status_code(&error);
    match error.error_data() {
        Some(data) => {
            let status_code = GetStatusCode::status_code(&data.error);
            (status_code, Json(data)).into_response()
        }
        None => status_code.into_response(),
    }
}
