use crate::permissions::Permission;
use crate::routes::api::v0::quizzes::error::QuizError;
use crate::user::{ExtractUser, ExtractUserId};
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use http::StatusCode;
use protect_axum::protect;
use scholar_core::quiz::evaluation::submit_attempt;
use scholar_db::counter::{self, ChildData, ChildKind, ChildPatch};
use scholar_db::quiz::quiz::{self, NewQuiz as NewQuizData, QuizPatch};
use scholar_model::quiz::attempt::{QuizAttempt, QuizResult};
use scholar_model::quiz::{NewQuiz, Quiz, QuizUpdate};
use scholar_model::validation::Validate;
use scholar_model_tools::convert::{IntoModel, TryFromDbModel, TryFromModel};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

pub(crate) mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_quizzes).post(create_quiz))
        .nest(
            "/{quiz_id}",
            Router::new()
                .route("/", get(get_quiz).put(update_quiz).delete(delete_quiz))
                .route("/submit", post(submit_quiz)),
        )
        .with_state(())
}

async fn load_quiz(conn: &DatabaseConnection, quiz_id: Uuid) -> Result<Quiz, QuizError> {
    let stored = quiz::Query::find_quiz_with_questions(conn, quiz_id)
        .await?
        .ok_or(QuizError::NotFound(quiz_id))?;
    Ok(Quiz::try_from_db_model(stored)?)
}

/// All quizzes without their questions.
#[utoipa::path(
    get,
    path = "/api/v0/quizzes",
    responses(
        (status = OK, body = Vec<Quiz>),
    ),
    tag = "v0/quizzes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn list_quizzes(
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<Quiz>>, QuizError> {
    let quizzes = quiz::Query::get_quizzes(&conn)
        .await?
        .into_iter()
        .map(IntoModel::into_model)
        .collect();
    Ok(Json(quizzes))
}

#[utoipa::path(
    post,
    path = "/api/v0/quizzes",
    request_body = NewQuiz,
    responses(
        (status = CREATED, body = Quiz),
        (status = NOT_FOUND, description = "The subject does not exist, nothing was written"),
        (status = UNPROCESSABLE_ENTITY, description = "A question is malformed"),
    ),
    tag = "v0/quizzes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn create_quiz(
    Extension(conn): Extension<DatabaseConnection>,
    Json(new_quiz): Json<NewQuiz>,
) -> Result<impl IntoResponse, QuizError> {
    new_quiz.validate()?;
    let subject_id = new_quiz.subject;
    let data = NewQuizData::try_from_model(new_quiz)?;
    let quiz_id = counter::Mutation::create_child_and_increment(&conn, subject_id, ChildData::Quiz(data)).await?;
    tracing::info!(%quiz_id, %subject_id, "created quiz");
    Ok((StatusCode::CREATED, Json(load_quiz(&conn, quiz_id).await?)))
}

/// A quiz with its questions. Students do not see the correct answers.
#[utoipa::path(
    get,
    path = "/api/v0/quizzes/{quiz_id}",
    params(("quiz_id" = Uuid, Path, description = "Id of the quiz")),
    responses(
        (status = OK, body = Quiz),
        (status = NOT_FOUND, description = "No such quiz"),
    ),
    tag = "v0/quizzes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn get_quiz(
    user: ExtractUser,
    Extension(conn): Extension<DatabaseConnection>,
    Path(quiz_id): Path<Uuid>,
) -> Result<Json<Quiz>, QuizError> {
    let mut quiz = load_quiz(&conn, quiz_id).await?;
    if !user.is_teacher() {
        quiz.sanitize_for_client();
    }
    Ok(Json(quiz))
}

/// Updates a quiz. New questions replace the old ones, changing `subject` moves the count.
#[utoipa::path(
    put,
    path = "/api/v0/quizzes/{quiz_id}",
    params(("quiz_id" = Uuid, Path, description = "Id of the quiz")),
    request_body = QuizUpdate,
    responses(
        (status = OK, body = Quiz),
        (status = NOT_FOUND, description = "No such quiz or target subject"),
        (status = UNPROCESSABLE_ENTITY, description = "A question is malformed"),
    ),
    tag = "v0/quizzes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn update_quiz(
    Extension(conn): Extension<DatabaseConnection>,
    Path(quiz_id): Path<Uuid>,
    Json(update): Json<QuizUpdate>,
) -> Result<Json<Quiz>, QuizError> {
    update.validate()?;
    let patch = QuizPatch::try_from_model(update)?;
    counter::Mutation::update_child(&conn, quiz_id, ChildPatch::Quiz(patch)).await?;
    Ok(Json(load_quiz(&conn, quiz_id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v0/quizzes/{quiz_id}",
    params(("quiz_id" = Uuid, Path, description = "Id of the quiz")),
    responses(
        (status = NO_CONTENT, description = "The quiz was deleted and uncounted"),
        (status = NOT_FOUND, description = "No such quiz"),
    ),
    tag = "v0/quizzes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn delete_quiz(
    Extension(conn): Extension<DatabaseConnection>,
    Path(quiz_id): Path<Uuid>,
) -> Result<StatusCode, QuizError> {
    counter::Mutation::delete_child_and_decrement(&conn, ChildKind::Quiz, quiz_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Scores the selected answers and appends the result to the caller's history.
#[utoipa::path(
    post,
    path = "/api/v0/quizzes/{quiz_id}/submit",
    params(("quiz_id" = Uuid, Path, description = "Id of the quiz")),
    request_body = QuizAttempt,
    responses(
        (status = OK, body = QuizResult),
        (status = NOT_FOUND, description = "No such quiz"),
        (status = UNPROCESSABLE_ENTITY, description = "The quiz has no questions"),
    ),
    tag = "v0/quizzes",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Basic", ty = "Permission")]
pub(crate) async fn submit_quiz(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(quiz_id): Path<Uuid>,
    Json(attempt): Json<QuizAttempt>,
) -> Result<Json<QuizResult>, QuizError> {
    let result = submit_attempt(&conn, &user_id, quiz_id, &attempt).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{TestApp, json_body, request, test_app};
    use http::{Method, StatusCode};
    use scholar_model::history::QuizHistory;
    use scholar_model::quiz::Quiz;
    use scholar_model::quiz::attempt::QuizResult;
    use scholar_model::subject::Subject;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use test_log::test;
    use uuid::Uuid;

    fn question(text: &str, correct_answer: usize) -> Value {
        json!({
            "text": text,
            "options": ["1", "2", "3", "4"],
            "correct_answer": correct_answer,
        })
    }

    async fn setup(app: &TestApp, teacher: &str) -> (Subject, Quiz) {
        let response = app
            .send(request(Method::POST, "/api/v0/subjects", teacher, Some(json!({"name": "Math"}))))
            .await;
        let math: Subject = json_body(response).await;

        let response = app
            .send(request(
                Method::POST,
                "/api/v0/quizzes",
                teacher,
                Some(json!({
                    "subject": math.id,
                    "title": "Counting",
                    "questions": [question("a", 2), question("b", 0), question("c", 3)],
                })),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        (math, json_body(response).await)
    }

    #[test(tokio::test)]
    async fn test_create_quiz_counts() {
        let app = test_app().await;
        let teacher = app.signup("turing", "teacher").await;
        let (math, quiz) = setup(&app, &teacher).await;
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(quiz.questions[0].correct_answer, Some(2));

        let response = app
            .send(request(Method::GET, &format!("/api/v0/subjects/{}", math.id), &teacher, None))
            .await;
        let math: Subject = json_body(response).await;
        assert_eq!(math.quiz_count, 1);
        assert_eq!(math.note_count, 0);

        let response = app
            .send(request(Method::DELETE, &format!("/api/v0/quizzes/{}", quiz.id), &teacher, None))
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = app
            .send(request(Method::GET, &format!("/api/v0/subjects/{}", math.id), &teacher, None))
            .await;
        let math: Subject = json_body(response).await;
        assert_eq!(math.quiz_count, 0);
    }

    #[test(tokio::test)]
    async fn test_invalid_answer_index() {
        let app = test_app().await;
        let teacher = app.signup("turing", "teacher").await;
        let (math, _) = setup(&app, &teacher).await;

        let response = app
            .send(request(
                Method::POST,
                "/api/v0/quizzes",
                &teacher,
                Some(json!({"subject": math.id, "title": "Broken", "questions": [question("a", 4)]})),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test(tokio::test)]
    async fn test_student_takes_quiz() {
        let app = test_app().await;
        let teacher = app.signup("turing", "teacher").await;
        let student = app.signup("ada", "student").await;
        let (_, quiz) = setup(&app, &teacher).await;

        let uri = format!("/api/v0/quizzes/{}", quiz.id);
        let response = app.send(request(Method::GET, &uri, &student, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let visible: Quiz = json_body(response).await;
        assert!(visible.questions.iter().all(|question| question.correct_answer.is_none()));

        let answers: HashMap<Uuid, usize> = HashMap::from([(quiz.questions[0].id, 2), (quiz.questions[1].id, 0)]);
        let response = app
            .send(request(
                Method::POST,
                &format!("{uri}/submit"),
                &student,
                Some(json!({ "answers": answers })),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let result: QuizResult = json_body(response).await;
        assert_eq!(result.correct, 2);
        assert_eq!(result.total, 3);
        assert_eq!(result.score, 67);

        let response = app
            .send(request(Method::GET, "/api/v0/user/history", &student, None))
            .await;
        let history: Vec<QuizHistory> = json_body(response).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].quiz_title, "Counting");
        assert_eq!(history[0].score, 67);
    }

    #[test(tokio::test)]
    async fn test_submit_unknown_quiz() {
        let app = test_app().await;
        let student = app.signup("ada", "student").await;
        let response = app
            .send(request(
                Method::POST,
                &format!("/api/v0/quizzes/{}/submit", Uuid::new_v4()),
                &student,
                Some(json!({"answers": {}})),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
