use crate::AppConfig;
use crate::app::{AuthConfig, create_router};
use crate::db::migration;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::response::Response;
use http::{Request, header};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header};
use scholar_core::llm_config::{LlmConfig, LlmService, LlmServiceConfig};
use sea_orm::{Database, DatabaseConnection};
use scholar_oidc::KeyStore;
use scholar_test_helpers::{SqliteDb, TestDb};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

pub(crate) const AUDIENCE: &str = "scholar-test";
const KEY_ID: &str = "test-key";
const SECRET: &[u8] = b"scholar-test-secret";

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    aud: &'a str,
    email: String,
    exp: u64,
}

fn sign(sub: &str, aud: &str, exp: u64) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(KEY_ID.to_owned());
    let claims = Claims {
        sub,
        aud,
        email: format!("{sub}@example.com"),
        exp,
    };
    jsonwebtoken::encode(&header, &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

pub(crate) fn id_token(sub: &str, aud: &str) -> String {
    sign(sub, aud, jsonwebtoken::get_current_timestamp() + 600)
}

pub(crate) fn expired_id_token(sub: &str) -> String {
    sign(sub, AUDIENCE, jsonwebtoken::get_current_timestamp() - 600)
}

pub(crate) fn key_store() -> KeyStore {
    KeyStore::from_keys([(KEY_ID.to_owned(), DecodingKey::from_secret(SECRET))])
}

pub(crate) struct TestApp {
    pub(crate) router: Router,
    pub(crate) conn: DatabaseConnection,
    _db: SqliteDb,
}

pub(crate) async fn test_app() -> TestApp {
    let db = SqliteDb::new().unwrap();
    let url = db.db_uri().parse().unwrap();
    migration(&url).unwrap();
    let conn = Database::connect(db.db_uri().into_owned()).await.unwrap();

    let llm_config = LlmConfig::new(
        LlmServiceConfig {
            key: None,
            default_model: None,
        },
        LlmServiceConfig {
            key: None,
            default_model: None,
        },
        LlmServiceConfig {
            key: None,
            default_model: None,
        },
        LlmService::OpenAI,
        None,
    );
    let auth_config = AuthConfig::new(Arc::new(key_store()), HashSet::from([AUDIENCE.to_owned()]));
    let router = create_router(AppConfig::new(llm_config), auth_config, &[], conn.clone()).unwrap();
    TestApp { router, conn, _db: db }
}

impl TestApp {
    pub(crate) async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Registers a profile through the signup route and returns its session token.
    pub(crate) async fn signup(&self, uid: &str, role: &str) -> String {
        let request = Request::post("/signup")
            .header(header::AUTHORIZATION, format!("Bearer {}", id_token(uid, AUDIENCE)))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"name":"{uid}","role":"{role}"}}"#)))
            .unwrap();
        let response = self.send(request).await;
        assert_eq!(response.status(), http::StatusCode::CREATED);
        let token: scholar_model::login::Token = json_body(response).await;
        token.access_token
    }
}

pub(crate) fn request(method: http::Method, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub(crate) async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
