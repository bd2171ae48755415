use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use http::StatusCode;
use scholar_core::status::get_db_status;
use scholar_model::status::{ComponentState, Status};
use sea_orm::DatabaseConnection;
use tracing::instrument;

pub fn create_router<S>() -> Router<S> {
    Router::new().route("/", get(get_status)).with_state(())
}

struct StatusResponse(Status);

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        let status_code = if self.0.is_ok() {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status_code, Json(self.0)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/status",
    responses(
        (status = OK, description = "Server is ok", body = Status, example = json!(Status { database: ComponentState::Ok })),
        (status = INTERNAL_SERVER_ERROR, description = "A component is unavailable", body = Status),
    ),
    tag = "util"
)]
#[instrument(skip_all)]
pub(crate) async fn get_status(Extension(conn): Extension<DatabaseConnection>) -> impl IntoResponse {
    StatusResponse(Status {
        database: get_db_status(&conn, None).await,
    })
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{json_body, test_app};
    use axum::body::Body;
    use http::{Request, StatusCode};
    use serde_json::Value;
    use test_log::test;

    #[test(tokio::test)]
    async fn test_status() {
        let app = test_app().await;
        let response = app
            .send(Request::get("/api/v0/status").body(Body::empty()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = json_body(response).await;
        assert_eq!(body["database"], "ok");
    }
}
