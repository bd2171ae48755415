use crate::permissions::extract;
use crate::{AppConfig, routes};
use axum::routing::get;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayerBuilder;
use http::{HeaderValue, Method, header};
use protect_axum::GrantsLayer;
use scholar_oidc::KeyStore;
use sea_orm::DatabaseConnection;
use sentry_tower::NewSentryLayer;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub(crate) struct InnerAuthConfig {
    key_store: Arc<KeyStore>,
    audience: HashSet<String>,
}

impl InnerAuthConfig {
    pub(crate) fn key_store(&self) -> &KeyStore {
        &self.key_store
    }

    pub(crate) fn audience(&self) -> &HashSet<String> {
        &self.audience
    }
}

#[derive(Clone)]
pub(crate) struct AuthConfig(Arc<InnerAuthConfig>);

impl AuthConfig {
    pub(crate) fn new(key_store: Arc<KeyStore>, audience: HashSet<String>) -> Self {
        Self(Arc::new(InnerAuthConfig { key_store, audience }))
    }
}

impl AsRef<InnerAuthConfig> for AuthConfig {
    fn as_ref(&self) -> &InnerAuthConfig {
        &self.0
    }
}

fn parse_origins(origins: &[String]) -> Result<Vec<HeaderValue>, header::InvalidHeaderValue> {
    origins.iter().map(|origin| origin.parse()).collect()
}

/// The full application including metrics.
///
/// Installs the global prometheus recorder, so it can only be called once per process.
pub fn create_app(
    app_config: AppConfig,
    auth_config: AuthConfig,
    origins: &[String],
    conn: DatabaseConnection,
) -> anyhow::Result<Router> {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_prefix("scholar")
        .with_default_metrics()
        .build_pair();

    let app = create_router(app_config, auth_config, origins, conn)?
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer);
    Ok(app)
}

pub(crate) fn create_router(
    app_config: AppConfig,
    auth_config: AuthConfig,
    origins: &[String],
    conn: DatabaseConnection,
) -> anyhow::Result<Router> {
    let origins = parse_origins(origins)?;
    if origins.is_empty() {
        tracing::warn!("no cors origins configured, browsers on other origins will be rejected");
    }

    // Login happens before the client holds a session token
    let login_cors = CorsLayer::new()
        .allow_origin(origins.clone())
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::AUTHORIZATION, header::ORIGIN])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .max_age(Duration::from_secs(3600));

    let api_cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::AUTHORIZATION, header::ORIGIN])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(routes::swagger::create_router())
        .merge(routes::login::create_router().layer(login_cors))
        .nest("/api/v0", routes::api::v0::create_router().layer(api_cors))
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(NewSentryLayer::new_from_top())
                .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
                .layer(Extension(app_config))
                .layer(Extension(auth_config))
                .layer(Extension(conn))
                .layer(GrantsLayer::with_extractor(extract)),
        )
        .with_state(());
    Ok(app)
}
