use crate::permissions::Permission;
use crate::routes::api::v0::subjects::error::SubjectError;
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use http::StatusCode;
use protect_axum::protect;
use scholar_db::note;
use scholar_db::quiz::quiz;
use scholar_db::subject::{self, SubjectChanges};
use scholar_model::note::Note;
use scholar_model::quiz::Quiz;
use scholar_model::subject::{NewSubject, Subject, SubjectUpdate};
use scholar_model::validation::Validate;
use scholar_model_tools::convert::{FromModel, IntoModel};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

pub(crate) mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_subjects).post(create_subject))
        .nest(
            "/{subject_id}",
            Router::new()
                .route("/", get(get_subject).put(update_subject).delete(delete_subject))
                .route("/notes", get(list_subject_notes))
                .route("/quizzes", get(list_subject_quizzes)),
        )
        .with_state(())
}

async fn require_subject(conn: &DatabaseConnection, subject_id: Uuid) -> Result<Subject, SubjectError> {
    subject::Query::find_subject_by_id(conn, subject_id)
        .await?
        .map(IntoModel::into_model)
        .ok_or(SubjectError::NotFound(subject_id))
}

#[utoipa::path(
    get,
    path = "/api/v0/subjects",
    responses(
        (status = OK, body = Vec<Subject>, description = "All subjects ordered by name"),
    ),
    tag = "v0/subjects",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn list_subjects(
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<Subject>>, SubjectError> {
    let subjects = subject::Query::get_subjects(&conn)
        .await?
        .into_iter()
        .map(IntoModel::into_model)
        .collect();
    Ok(Json(subjects))
}

#[utoipa::path(
    post,
    path = "/api/v0/subjects",
    request_body = NewSubject,
    responses(
        (status = CREATED, body = Subject, description = "The created subject, counters start at zero"),
        (status = UNPROCESSABLE_ENTITY, description = "The subject has no name"),
    ),
    tag = "v0/subjects",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn create_subject(
    Extension(conn): Extension<DatabaseConnection>,
    Json(new_subject): Json<NewSubject>,
) -> Result<impl IntoResponse, SubjectError> {
    new_subject.validate()?;
    let NewSubject {
        name,
        description,
        image,
    } = new_subject;
    let created = subject::Mutation::create_subject(&conn, name, description, image).await?;
    tracing::info!(subject_id = %created.id, "created subject");
    let created: Subject = created.into_model();
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/v0/subjects/{subject_id}",
    params(("subject_id" = Uuid, Path, description = "Id of the subject")),
    responses(
        (status = OK, body = Subject),
        (status = NOT_FOUND, description = "No such subject"),
    ),
    tag = "v0/subjects",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn get_subject(
    Extension(conn): Extension<DatabaseConnection>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<Subject>, SubjectError> {
    Ok(Json(require_subject(&conn, subject_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v0/subjects/{subject_id}",
    params(("subject_id" = Uuid, Path, description = "Id of the subject")),
    request_body = SubjectUpdate,
    responses(
        (status = OK, body = Subject, description = "The updated subject"),
        (status = NOT_FOUND, description = "No such subject"),
    ),
    tag = "v0/subjects",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn update_subject(
    Extension(conn): Extension<DatabaseConnection>,
    Path(subject_id): Path<Uuid>,
    Json(update): Json<SubjectUpdate>,
) -> Result<Json<Subject>, SubjectError> {
    update.validate()?;
    let updated = subject::Mutation::update_subject(&conn, subject_id, SubjectChanges::from_model(update))
        .await?
        .ok_or(SubjectError::NotFound(subject_id))?;
    Ok(Json(updated.into_model()))
}

/// Deletes the subject together with all of its notes and quizzes.
#[utoipa::path(
    delete,
    path = "/api/v0/subjects/{subject_id}",
    params(("subject_id" = Uuid, Path, description = "Id of the subject")),
    responses(
        (status = NO_CONTENT, description = "The subject and its children were deleted"),
        (status = NOT_FOUND, description = "No such subject"),
    ),
    tag = "v0/subjects",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn delete_subject(
    Extension(conn): Extension<DatabaseConnection>,
    Path(subject_id): Path<Uuid>,
) -> Result<StatusCode, SubjectError> {
    if !subject::Mutation::delete_subject(&conn, subject_id).await? {
        return Err(SubjectError::NotFound(subject_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v0/subjects/{subject_id}/notes",
    params(("subject_id" = Uuid, Path, description = "Id of the subject")),
    responses(
        (status = OK, body = Vec<Note>),
        (status = NOT_FOUND, description = "No such subject"),
    ),
    tag = "v0/subjects",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn list_subject_notes(
    Extension(conn): Extension<DatabaseConnection>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<Vec<Note>>, SubjectError> {
    require_subject(&conn, subject_id).await?;
    let notes = note::Query::get_notes_by_subject(&conn, subject_id)
        .await?
        .into_iter()
        .map(IntoModel::into_model)
        .collect();
    Ok(Json(notes))
}

/// Quizzes of the subject without their questions.
#[utoipa::path(
    get,
    path = "/api/v0/subjects/{subject_id}/quizzes",
    params(("subject_id" = Uuid, Path, description = "Id of the subject")),
    responses(
        (status = OK, body = Vec<Quiz>),
        (status = NOT_FOUND, description = "No such subject"),
    ),
    tag = "v0/subjects",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn list_subject_quizzes(
    Extension(conn): Extension<DatabaseConnection>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<Vec<Quiz>>, SubjectError> {
    require_subject(&conn, subject_id).await?;
    let quizzes = quiz::Query::get_quizzes_by_subject(&conn, subject_id)
        .await?
        .into_iter()
        .map(IntoModel::into_model)
        .collect();
    Ok(Json(quizzes))
}
