use axum::Router;

pub(crate) mod dashboard;
pub(crate) mod generate;
pub(crate) mod notes;
pub(crate) mod quizzes;
pub(crate) mod status;
pub(crate) mod subjects;
pub(crate) mod user;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .nest("/status", status::create_router())
        .nest("/subjects", subjects::create_router())
        .nest("/notes", notes::create_router())
        .nest("/quizzes", quizzes::create_router())
        .nest("/user", user::create_router())
        .nest("/generate", generate::create_router())
        .merge(dashboard::create_router())
}
