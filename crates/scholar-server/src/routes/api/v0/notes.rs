use crate::permissions::Permission;
use crate::routes::api::v0::notes::error::NoteError;
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use http::StatusCode;
use protect_axum::protect;
use scholar_db::counter::{self, ChildData, ChildKind, ChildPatch};
use scholar_db::note::{self, NewNote as NewNoteData, NotePatch};
use scholar_model::note::{NewNote, Note, NoteUpdate};
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
        .route("/", get(list_notes).post(create_note))
        .route("/{note_id}", get(get_note).put(update_note).delete(delete_note))
        .with_state(())
}

async fn load_note(conn: &DatabaseConnection, note_id: Uuid) -> Result<Note, NoteError> {
    note::Query::find_note_by_id(conn, note_id)
        .await?
        .map(IntoModel::into_model)
        .ok_or(NoteError::NotFound(note_id))
}

#[utoipa::path(
    get,
    path = "/api/v0/notes",
    responses(
        (status = OK, body = Vec<Note>),
    ),
    tag = "v0/notes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn list_notes(Extension(conn): Extension<DatabaseConnection>) -> Result<Json<Vec<Note>>, NoteError> {
    let notes = note::Query::get_notes(&conn)
        .await?
        .into_iter()
        .map(IntoModel::into_model)
        .collect();
    Ok(Json(notes))
}

/// Creates a note and counts it on its subject in one transaction.
#[utoipa::path(
    post,
    path = "/api/v0/notes",
    request_body = NewNote,
    responses(
        (status = CREATED, body = Note),
        (status = NOT_FOUND, description = "The subject does not exist, nothing was written"),
        (status = UNPROCESSABLE_ENTITY, description = "The note has no title"),
    ),
    tag = "v0/notes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn create_note(
    Extension(conn): Extension<DatabaseConnection>,
    Json(new_note): Json<NewNote>,
) -> Result<impl IntoResponse, NoteError> {
    new_note.validate()?;
    let subject_id = new_note.subject;
    let note_id = counter::Mutation::create_child_and_increment(
        &conn,
        subject_id,
        ChildData::Note(NewNoteData::from_model(new_note)),
    )
    .await?;
    tracing::info!(%note_id, %subject_id, "created note");
    Ok((StatusCode::CREATED, Json(load_note(&conn, note_id).await?)))
}

#[utoipa::path(
    get,
    path = "/api/v0/notes/{note_id}",
    params(("note_id" = Uuid, Path, description = "Id of the note")),
    responses(
        (status = OK, body = Note),
        (status = NOT_FOUND, description = "No such note"),
    ),
    tag = "v0/notes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn get_note(
    Extension(conn): Extension<DatabaseConnection>,
    Path(note_id): Path<Uuid>,
) -> Result<Json<Note>, NoteError> {
    Ok(Json(load_note(&conn, note_id).await?))
}

/// Updates a note. Changing `subject` moves the count from the old subject to the new one.
#[utoipa::path(
    put,
    path = "/api/v0/notes/{note_id}",
    params(("note_id" = Uuid, Path, description = "Id of the note")),
    request_body = NoteUpdate,
    responses(
        (status = OK, body = Note),
        (status = NOT_FOUND, description = "No such note or target subject"),
    ),
    tag = "v0/notes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn update_note(
    Extension(conn): Extension<DatabaseConnection>,
    Path(note_id): Path<Uuid>,
    Json(update): Json<NoteUpdate>,
) -> Result<Json<Note>, NoteError> {
    update.validate()?;
    counter::Mutation::update_child(&conn, note_id, ChildPatch::Note(NotePatch::from_model(update))).await?;
    Ok(Json(load_note(&conn, note_id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v0/notes/{note_id}",
    params(("note_id" = Uuid, Path, description = "Id of the note")),
    responses(
        (status = NO_CONTENT, description = "The note was deleted and uncounted"),
        (status = NOT_FOUND, description = "No such note"),
    ),
    tag = "v0/notes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn delete_note(
    Extension(conn): Extension<DatabaseConnection>,
    Path(note_id): Path<Uuid>,
) -> Result<StatusCode, NoteError> {
    counter::Mutation::delete_child_and_decrement(&conn, ChildKind::Note, note_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{TestApp, json_body, request, test_app};
    use http::{Method, StatusCode};
    use scholar_model::note::Note;
    use scholar_model::subject::Subject;
    use serde_json::json;
    use test_log::test;
    use uuid::Uuid;

    async fn create_subject(app: &TestApp, token: &str, name: &str) -> Subject {
        let response = app
            .send(request(Method::POST, "/api/v0/subjects", token, Some(json!({"name": name}))))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }

    async fn get_subject(app: &TestApp, token: &str, id: Uuid) -> Subject {
        let response = app
            .send(request(Method::GET, &format!("/api/v0/subjects/{id}"), token, None))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[test(tokio::test)]
    async fn test_note_counts_follow_lifecycle() {
        let app = test_app().await;
        let teacher = app.signup("turing", "teacher").await;
        let math = create_subject(&app, &teacher, "Math").await;

        let response = app
            .send(request(
                Method::POST,
                "/api/v0/notes",
                &teacher,
                Some(json!({"subject": math.id, "title": "Algebra", "content": "<p>x + 1</p>"})),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let algebra: Note = json_body(response).await;
        assert_eq!(algebra.subject, math.id);
        assert_eq!(get_subject(&app, &teacher, math.id).await.note_count, 1);

        let response = app
            .send(request(
                Method::GET,
                &format!("/api/v0/subjects/{}/notes", math.id),
                &teacher,
                None,
            ))
            .await;
        let notes: Vec<Note> = json_body(response).await;
        assert_eq!(notes, vec![algebra.clone()]);

        let uri = format!("/api/v0/notes/{}", algebra.id);
        let response = app.send(request(Method::DELETE, &uri, &teacher, None)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(get_subject(&app, &teacher, math.id).await.note_count, 0);

        let response = app.send(request(Method::DELETE, &uri, &teacher, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(get_subject(&app, &teacher, math.id).await.note_count, 0);
    }

    #[test(tokio::test)]
    async fn test_note_for_unknown_subject() {
        let app = test_app().await;
        let teacher = app.signup("turing", "teacher").await;

        let response = app
            .send(request(
                Method::POST,
                "/api/v0/notes",
                &teacher,
                Some(json!({"subject": Uuid::new_v4(), "title": "Algebra"})),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.send(request(Method::GET, "/api/v0/notes", &teacher, None)).await;
        let notes: Vec<Note> = json_body(response).await;
        assert!(notes.is_empty());
    }

    #[test(tokio::test)]
    async fn test_move_note() {
        let app = test_app().await;
        let teacher = app.signup("turing", "teacher").await;
        let math = create_subject(&app, &teacher, "Math").await;
        let physics = create_subject(&app, &teacher, "Physics").await;

        let response = app
            .send(request(
                Method::POST,
                "/api/v0/notes",
                &teacher,
                Some(json!({"subject": math.id, "title": "Vectors"})),
            ))
            .await;
        let note: Note = json_body(response).await;

        let response = app
            .send(request(
                Method::PUT,
                &format!("/api/v0/notes/{}", note.id),
                &teacher,
                Some(json!({"subject": physics.id, "content": "<p>arrows</p>"})),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let moved: Note = json_body(response).await;
        assert_eq!(moved.subject, physics.id);
        assert_eq!(moved.title, "Vectors");
        assert_eq!(moved.content, "<p>arrows</p>");

        assert_eq!(get_subject(&app, &teacher, math.id).await.note_count, 0);
        assert_eq!(get_subject(&app, &teacher, physics.id).await.note_count, 1);
    }

    #[test(tokio::test)]
    async fn test_students_read_only() {
        let app = test_app().await;
        let teacher = app.signup("turing", "teacher").await;
        let student = app.signup("ada", "student").await;
        let math = create_subject(&app, &teacher, "Math").await;

        let response = app
            .send(request(
                Method::POST,
                "/api/v0/notes",
                &student,
                Some(json!({"subject": math.id, "title": "Algebra"})),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(get_subject(&app, &student, math.id).await.note_count, 0);
    }
}
