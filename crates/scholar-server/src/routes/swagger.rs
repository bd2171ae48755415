use super::api;
use super::login;

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder};
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

struct SecurityAddon;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        api::v0::subjects::list_subjects,
        api::v0::subjects::create_subject,
        api::v0::subjects::get_subject,
        api::v0::subjects::update_subject,
        api::v0::subjects::delete_subject,
        api::v0::subjects::list_subject_notes,
        api::v0::subjects::list_subject_quizzes,
        api::v0::notes::list_notes,
        api::v0::notes::create_note,
        api::v0::notes::get_note,
        api::v0::notes::update_note,
        api::v0::notes::delete_note,
        api::v0::quizzes::list_quizzes,
        api::v0::quizzes::create_quiz,
        api::v0::quizzes::get_quiz,
        api::v0::quizzes::update_quiz,
        api::v0::quizzes::delete_quiz,
        api::v0::quizzes::submit_quiz,
        api::v0::user::get_user,
        api::v0::user::update_user,
        api::v0::user::get_history,
        api::v0::dashboard::list_students,
        api::v0::dashboard::get_stats,
        api::v0::generate::draft_note,
        api::v0::generate::draft_quiz,
        login::signup,
        login::login_token,
        login::logout,
    ),
    modifiers(&SecurityAddon),
    tags()
)]
struct ApiDoc;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let Some(components) = openapi.components.as_mut() else {
            tracing::warn!("no components registered, skipping security scheme");
            return;
        };
        components.add_security_scheme(
            "token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Session token or identity token"))
                    .build(),
            ),
        );
    }
}

pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v0/quizzes/{quiz_id}/submit"));
        assert!(doc.paths.paths.contains_key("/signup"));
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("token"));
    }
}
