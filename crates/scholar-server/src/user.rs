use crate::app::AuthConfig;
use crate::auth::{AuthError, validate_id_token};
use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::{Extension, RequestPartsExt};
use axum_auth::AuthBearer;
use axum_extra::extract::Cached;
use http::StatusCode;
use http::request::Parts;
use scholar_db::user;
use scholar_entity::user::Model as UserModel;
use scholar_model::user::{Role, UserProfile};
use scholar_model_tools::convert::IntoModel;
use sea_orm::DatabaseConnection;
use std::error::Error;
use url::form_urlencoded;

fn extract_auth_token_from_params(parts: &Parts) -> Option<String> {
    let query = parts.uri.query()?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned())
}

type Rejection = (StatusCode, &'static str);

/// The caller of a request.
///
/// Resolved once per request from either a session token issued by this server or an identity
/// token of the authentication provider. Handlers receive it through [`ExtractUser`] or
/// [`ExtractUserId`].
#[derive(Clone)]
struct Session {
    user: UserProfile,
}

#[derive(Clone)]
pub(crate) struct ExtractUser(pub UserProfile);

#[derive(Clone)]
pub(crate) struct ExtractUserId(pub String);

impl ExtractUser {
    pub(crate) fn is_teacher(&self) -> bool {
        self.0.role == Role::Teacher
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = if let Ok(AuthBearer(token)) = parts.extract::<AuthBearer>().await {
            token
        } else if let Some(token) = extract_auth_token_from_params(parts) {
            token
        } else {
            return Err((StatusCode::UNAUTHORIZED, "No authentication token provided"));
        };

        let Ok(auth_config) = parts.extract::<Option<Extension<AuthConfig>>>().await;

        let Extension::<DatabaseConnection>(conn) =
            parts
                .extract::<Extension<DatabaseConnection>>()
                .await
                .map_err(|error| {
                    tracing::error!(
                        error = &error as &dyn Error,
                        "database connection not found in app data"
                    );
                    (StatusCode::INTERNAL_SERVER_ERROR, "Database Connection not found")
                })?;

        let user = match auth_config {
            Some(Extension(auth_config)) => {
                let auth_config = auth_config.as_ref();
                match validate_id_token(&token, auth_config.audience(), auth_config.key_store()).await {
                    Ok(Some(claims)) => Self::from_identity(&conn, &claims.sub).await?,
                    Ok(None) => Self::from_db(&conn, &token).await?,
                    Err(AuthError::Unauthorized) => return Err((StatusCode::UNAUTHORIZED, "Invalid token claims")),
                    Err(error) => {
                        tracing::error!(error = &error as &dyn Error, "error validating token");
                        return Err((StatusCode::INTERNAL_SERVER_ERROR, "Error validating token"));
                    }
                }
            }
            None => {
                tracing::warn!("no auth config found, only session tokens are accepted");
                Self::from_db(&conn, &token).await?
            }
        };

        sentry::configure_scope(|scope| {
            scope.set_user(Some(sentry::User {
                id: Some(user.id.clone()),
                ..Default::default()
            }));
        });

        Ok(Self {
            user: user.into_model(),
        })
    }
}

impl Session {
    async fn from_identity(conn: &DatabaseConnection, uid: &str) -> Result<UserModel, Rejection> {
        match user::Query::find_user_by_id(conn, uid).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                tracing::debug!(uid, "identity without profile");
                Err((StatusCode::FORBIDDEN, "No profile for this identity, sign up first"))
            }
            Err(_) => Err((StatusCode::INTERNAL_SERVER_ERROR, "Error loading user")),
        }
    }

    async fn from_db(conn: &DatabaseConnection, token: &str) -> Result<UserModel, Rejection> {
        let Ok(Some(user)) = user::Query::find_by_token(conn, token).await else {
            return Err((StatusCode::UNAUTHORIZED, "Authentication failed."));
        };
        Ok(user)
    }
}

impl<S> OptionalFromRequestParts<S> for ExtractUser
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let Ok(session) = Cached::<Session>::from_request_parts(parts, state).await else {
            return Ok(None);
        };
        Ok(Some(Self(session.0.user)))
    }
}

impl<S> FromRequestParts<S> for ExtractUser
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session: Session = Cached::<Session>::from_request_parts(parts, state).await?.0;
        Ok(Self(session.user))
    }
}

impl<S> FromRequestParts<S> for ExtractUserId
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session: Session = Cached::<Session>::from_request_parts(parts, state).await?.0;
        Ok(Self(session.user.uid))
    }
}
