use crate::AppConfig;
use crate::permissions::Permission;
use crate::routes::api::v0::generate::error::DraftError;
use axum::routing::post;
use axum::{Extension, Json, Router};
use protect_axum::protect;
use scholar_core::generate::note::generate_note;
use scholar_core::generate::quiz::generate_quiz;
use scholar_model::generate::{NoteDraft, NoteDraftRequest, QuizDraft, QuizDraftRequest};

pub(crate) mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/note", post(draft_note))
        .route("/quiz", post(draft_quiz))
        .with_state(())
}

/// Drafts a note for review. Nothing is stored.
#[utoipa::path(
    post,
    path = "/api/v0/generate/note",
    request_body = NoteDraftRequest,
    responses(
        (status = OK, body = NoteDraft),
        (status = UNPROCESSABLE_ENTITY, description = "Subject or topic missing"),
        (status = BAD_GATEWAY, description = "The completion service failed"),
    ),
    tag = "v0/generate",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn draft_note(
    Extension(app_config): Extension<AppConfig>,
    Json(request): Json<NoteDraftRequest>,
) -> Result<Json<NoteDraft>, DraftError> {
    Ok(Json(generate_note(app_config.llm_config(), &request).await?))
}

/// Drafts multiple choice questions with four options each. Nothing is stored.
#[utoipa::path(
    post,
    path = "/api/v0/generate/quiz",
    request_body = QuizDraftRequest,
    responses(
        (status = OK, body = QuizDraft),
        (status = UNPROCESSABLE_ENTITY, description = "Missing fields or question count out of range"),
        (status = BAD_GATEWAY, description = "The completion service failed"),
    ),
    tag = "v0/generate",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn draft_quiz(
    Extension(app_config): Extension<AppConfig>,
    Json(request): Json<QuizDraftRequest>,
) -> Result<Json<QuizDraft>, DraftError> {
    Ok(Json(generate_quiz(app_config.llm_config(), &request).await?))
}
