//! Aggregates for the teacher dashboard.

use crate::permissions::Permission;
use axum::routing::get;
use axum::{Extension, Json, Router};
use http::StatusCode;
use protect_axum::protect;
use scholar_core::overview::{dashboard_stats, student_overview};
use scholar_model::stats::Stats;
use scholar_model::user::StudentOverview;
use sea_orm::{DatabaseConnection, DbErr};
use std::error::Error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/students", get(list_students))
        .route("/stats", get(get_stats))
        .with_state(())
}

fn internal_error(error: DbErr) -> (StatusCode, &'static str) {
    tracing::error!(error = &error as &dyn Error, "failed to load dashboard data");
    (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
}

#[utoipa::path(
    get,
    path = "/api/v0/students",
    responses(
        (status = OK, body = Vec<StudentOverview>, description = "Students with their quiz activity"),
    ),
    tag = "v0/dashboard",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn list_students(
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<StudentOverview>>, (StatusCode, &'static str)> {
    student_overview(&conn).await.map(Json).map_err(internal_error)
}

#[utoipa::path(
    get,
    path = "/api/v0/stats",
    responses(
        (status = OK, body = Stats),
    ),
    tag = "v0/dashboard",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn get_stats(
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Stats>, (StatusCode, &'static str)> {
    dashboard_stats(&conn).await.map(Json).map_err(internal_error)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{json_body, request, test_app};
    use http::{Method, StatusCode};
    use scholar_model::quiz::Quiz;
    use scholar_model::subject::Subject;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use test_log::test;

    #[test(tokio::test)]
    async fn test_dashboard() {
        let app = test_app().await;
        let teacher = app.signup("turing", "teacher").await;
        let ada = app.signup("ada", "student").await;
        app.signup("grace", "student").await;

        let response = app
            .send(request(Method::POST, "/api/v0/subjects", &teacher, Some(json!({"name": "Math"}))))
            .await;
        let math: Subject = json_body(response).await;
        let response = app
            .send(request(
                Method::POST,
                "/api/v0/quizzes",
                &teacher,
                Some(json!({
                    "subject": math.id,
                    "title": "Counting",
                    "questions": [{"text": "1 + 1", "options": ["1", "2"], "correct_answer": 1}],
                })),
            ))
            .await;
        let quiz: Quiz = json_body(response).await;
        let answers = HashMap::from([(quiz.questions[0].id, 1)]);
        let response = app
            .send(request(
                Method::POST,
                &format!("/api/v0/quizzes/{}/submit", quiz.id),
                &ada,
                Some(json!({ "answers": answers })),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.send(request(Method::GET, "/api/v0/stats", &teacher, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let stats: Value = json_body(response).await;
        assert_eq!(stats, json!({"subjects": 1, "quizzes": 1, "students": 2}));

        let response = app.send(request(Method::GET, "/api/v0/students", &teacher, None)).await;
        let students: Vec<Value> = json_body(response).await;
        let ada_overview = students.iter().find(|student| student["uid"] == "ada").unwrap();
        assert_eq!(ada_overview["quizzes_taken"], 1);
        assert_eq!(ada_overview["avg_score"], 100);
        let grace_overview = students.iter().find(|student| student["uid"] == "grace").unwrap();
        assert_eq!(grace_overview["quizzes_taken"], 0);
        assert!(grace_overview.get("avg_score").is_none());
    }

    #[test(tokio::test)]
    async fn test_dashboard_requires_teacher() {
        let app = test_app().await;
        let student = app.signup("ada", "student").await;
        let response = app.send(request(Method::GET, "/api/v0/stats", &student, None)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
