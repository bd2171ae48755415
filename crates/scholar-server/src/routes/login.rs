use crate::app::AuthConfig;
use crate::auth::validate_id_token;
use crate::routes::error::{ErrorData, LoginError, LoginErrorType};
use crate::user::{ExtractUser, ExtractUserId};
use axum::body::Bytes;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use axum_auth::AuthBearer;
use http::StatusCode;
use scholar_db::{session, user};
use scholar_entity::user::Role as RoleModel;
use scholar_model::login::{Signup, Token};
use scholar_model::validation::Validate;
use scholar_model_tools::convert::IntoDbModel;
use sea_orm::{DatabaseConnection, SqlErr};
use std::borrow::Cow;
use std::error::Error;
use std::str::from_utf8;

pub fn create_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/whoami", get(whoami))
        .route("/signup", post(signup))
        .route("/logout", post(logout))
        .nest("/login", Router::new().route("/token", post(login_token)))
        .with_state(())
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = Signup,
    responses(
        (status = CREATED, description = "Profile created, returns Bearer token", body = Token),
        (status = UNAUTHORIZED, description = "The identity token was rejected", body = ErrorData<LoginErrorType>),
        (status = CONFLICT, description = "The identity already has a profile", body = ErrorData<LoginErrorType>),
        (status = UNPROCESSABLE_ENTITY, description = "The signup data is invalid", body = ErrorData<LoginErrorType>),
    ),
    tag = "util",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn signup(
    Extension(state): Extension<AuthConfig>,
    Extension(conn): Extension<DatabaseConnection>,
    AuthBearer(id_token): AuthBearer,
    Json(signup): Json<Signup>,
) -> Result<impl IntoResponse, LoginError> {
    signup.validate()?;
    let state = state.as_ref();
    let claims = validate_id_token(&id_token, state.audience(), state.key_store())
        .await?
        .ok_or_else(|| {
            tracing::warn!("signup failed: invalid token");
            LoginError::Invalid
        })?;

    let role: RoleModel = signup.role.into_db_model();
    let user = user::Mutation::create_user(&conn, &claims.sub, claims.email, Some(signup.name), role)
        .await
        .map_err(|error| match error.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => LoginError::AlreadyRegistered,
            _ => LoginError::DatabaseError(error),
        })?;
    tracing::info!(uid = %user.id, role = %signup.role, "user signed up");

    let session = session::Mutation::open_session(&conn, &user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(Token {
            access_token: session.token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/login/token",
    request_body(content = String, description = "The plain jwt token received from auth-server", content_type = "text/plain"),
    responses(
        (status = OK, description = "Successful login, returns Bearer token", body = Token, example = json!( Token { access_token: "abcToken12345678".into() })),
        (status = UNAUTHORIZED, description = "Authentication failed. Possible reason may be that the token is expired.", body = ErrorData<LoginErrorType>),
        (status = FORBIDDEN, description = "The identity has no profile yet", body = ErrorData<LoginErrorType>),
    ),
    tag = "util"
)]
pub(crate) async fn login_token(
    Extension(state): Extension<AuthConfig>,
    Extension(conn): Extension<DatabaseConnection>,
    token: Bytes,
) -> Result<Json<Token>, LoginError> {
    let state = state.as_ref();
    let token =
        from_utf8(&token).inspect_err(|error| tracing::warn!(error = error as &dyn Error, "could not read token"))?;

    let claims = validate_id_token(token.trim(), state.audience(), state.key_store())
        .await?
        .ok_or_else(|| {
            tracing::warn!("authentication failed: invalid token");
            LoginError::Invalid
        })?;

    if user::Query::find_user_by_id(&conn, &claims.sub).await?.is_none() {
        tracing::debug!(uid = %claims.sub, "login without profile");
        return Err(LoginError::NoProfile);
    }

    let session = session::Mutation::open_session(&conn, &claims.sub).await?;
    Ok(Json(Token {
        access_token: session.token,
    }))
}

async fn whoami(user: Option<ExtractUser>) -> impl IntoResponse {
    match user {
        None => {
            tracing::debug!("no user found");
            (StatusCode::NOT_FOUND, Cow::Borrowed("no user"))
        }
        Some(ExtractUser(user)) => {
            let name = user.name.unwrap_or(user.uid);
            (StatusCode::OK, Cow::Owned(format!("Hello {name} ({})", user.role)))
        }
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = NO_CONTENT, description = "User Logged out successfully"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to delete session")
    ),
    tag = "util",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn logout(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> impl IntoResponse {
    if let Err(error) = session::Mutation::close_session(&conn, &user_id).await {
        tracing::error!(
            user = %user_id,
            error = &error as &dyn Error,
            "failed to delete session"
        );
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    tracing::debug!(user = %user_id, "user logged out");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{AUDIENCE, id_token, json_body, request, test_app};
    use axum::body::Body;
    use http::{Method, Request, StatusCode, header};
    use scholar_model::login::Token;
    use serde_json::{Value, json};
    use test_log::test;

    fn login_request(id_token: String) -> Request<Body> {
        Request::post("/login/token")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(id_token))
            .unwrap()
    }

    #[test(tokio::test)]
    async fn test_session_lifecycle() {
        let app = test_app().await;
        let token = app.signup("ada", "student").await;

        let response = app.send(request(Method::GET, "/api/v0/user", &token, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let profile: Value = json_body(response).await;
        assert_eq!(profile["uid"], "ada");
        assert_eq!(profile["role"], "student");
        assert_eq!(profile["email"], "ada@example.com");

        // logging in again hands out the open session
        let response = app.send(login_request(id_token("ada", AUDIENCE))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let login: Token = json_body(response).await;
        assert_eq!(login.access_token, token);

        let response = app.send(request(Method::POST, "/logout", &token, None)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.send(request(Method::GET, "/whoami", &token, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test(tokio::test)]
    async fn test_login_requires_profile() {
        let app = test_app().await;
        let response = app.send(login_request(id_token("grace", AUDIENCE))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = json_body(response).await;
        assert_eq!(body["error"], "no_profile");
    }

    #[test(tokio::test)]
    async fn test_login_rejects_foreign_audience() {
        let app = test_app().await;
        app.signup("ada", "student").await;
        let response = app.send(login_request(id_token("ada", "other-app"))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test(tokio::test)]
    async fn test_signup_twice() {
        let app = test_app().await;
        app.signup("ada", "teacher").await;

        let response = app
            .send(request(
                Method::POST,
                "/signup",
                &id_token("ada", AUDIENCE),
                Some(json!({"name": "Ada", "role": "student"})),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test(tokio::test)]
    async fn test_signup_requires_name() {
        let app = test_app().await;
        let response = app
            .send(request(
                Method::POST,
                "/signup",
                &id_token("ada", AUDIENCE),
                Some(json!({"name": " ", "role": "student"})),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test(tokio::test)]
    async fn test_identity_token_as_bearer() {
        let app = test_app().await;
        app.signup("ada", "teacher").await;

        let response = app
            .send(request(Method::GET, "/whoami", &id_token("ada", AUDIENCE), None))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .send(request(Method::GET, "/api/v0/user", &id_token("grace", AUDIENCE), None))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
