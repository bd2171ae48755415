use crate::permissions::Permission;
use crate::routes::api::v0::user::error::UserError;
use crate::user::{ExtractUser, ExtractUserId};
use axum::routing::get;
use axum::{Extension, Json, Router};
use protect_axum::protect;
use scholar_db::{history, user};
use scholar_model::history::QuizHistory;
use scholar_model::user::{ProfileChanges, UserProfile};
use scholar_model::validation::Validate;
use scholar_model_tools::convert::IntoModel;
use sea_orm::ActiveValue::Set;
use sea_orm::{DatabaseConnection, IntoActiveModel};

pub(crate) mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(get_user).patch(update_user))
        .route("/history", get(get_history))
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/user",
    responses(
        (status = OK, body = UserProfile, description = "Profile of the caller"),
    ),
    tag = "v0/user",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn get_user(ExtractUser(user): ExtractUser) -> Json<UserProfile> {
    Json(user)
}

/// Changes name or photo of the caller. Role and email are fixed at signup.
#[utoipa::path(
    patch,
    path = "/api/v0/user",
    request_body = ProfileChanges,
    responses(
        (status = OK, body = UserProfile, description = "The updated profile"),
        (status = UNPROCESSABLE_ENTITY, description = "Empty name or an immutable field"),
    ),
    tag = "v0/user",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn update_user(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Json(changes): Json<ProfileChanges>,
) -> Result<Json<UserProfile>, UserError> {
    changes.validate()?;
    let mut model = user::Query::find_user_by_id(&conn, &user_id)
        .await?
        .ok_or(UserError::NotFound)?
        .into_active_model();
    if let Some(name) = changes.name {
        model.name = Set(Some(name));
    }
    if let Some(photo_url) = changes.photo_url {
        model.photo_url = Set(photo_url);
    }
    let updated = user::Mutation::update_user(&conn, model).await?;
    Ok(Json(updated.into_model()))
}

/// Completed quiz attempts of the caller in the order they were submitted.
#[utoipa::path(
    get,
    path = "/api/v0/user/history",
    responses(
        (status = OK, body = Vec<QuizHistory>),
    ),
    tag = "v0/user",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn get_history(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<QuizHistory>>, UserError> {
    let entries = history::Query::get_history_by_user(&conn, &user_id)
        .await?
        .into_iter()
        .map(IntoModel::into_model)
        .collect();
    Ok(Json(entries))
}
