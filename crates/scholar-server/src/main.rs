#[macro_use]
extern crate diesel_migrations;

use crate::app::AuthConfig;
use crate::db::migration;
use crate::opt::{Commands, Db, Logging, Reconcile, Run};
use anyhow::Result;
use axum::serve;
use clap::Parser;
use scholar_core::llm_config::LlmConfig;
use scholar_db::subject;
use scholar_oidc::KeyStore;
use scholar_utils::net::create_listener;
use scholar_utils::tracing::{TracingConfig, TracingGuard};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

mod app;
mod auth;
mod db;
mod opt;
mod permissions;
mod routes;
#[cfg(test)]
mod test_utils;
mod user;

const DEFAULT_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3030);

#[derive(Debug)]
pub(crate) struct InnerAppConfig {
    llm_config: LlmConfig,
}

#[derive(Clone, Debug)]
pub(crate) struct AppConfig(Arc<InnerAppConfig>);

impl AppConfig {
    pub(crate) fn new(llm_config: LlmConfig) -> Self {
        Self(Arc::new(InnerAppConfig { llm_config }))
    }

    pub fn llm_config(&self) -> &LlmConfig {
        &self.0.llm_config
    }
}

fn setup_tracing(logging: Logging) -> Result<TracingGuard> {
    let guard = scholar_utils::tracing::setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(logging.sentry_dsn)
            .env(logging.env)
            .format(logging.log_format)
            .build(),
    )?;
    Ok(guard)
}

async fn connect(db: Db) -> Result<DatabaseConnection> {
    migration(&db.database_url)
        .inspect_err(|error| tracing::error!(error = error as &dyn std::error::Error, "failed to run migrations"))?;
    let conn = Database::connect(build_connect_options(&db)).await?;
    Ok(conn)
}

async fn run(opt: Run) -> Result<()> {
    let _guard = setup_tracing(opt.logging)?;

    let llm_config = LlmConfig::try_from(opt.llm_services)?;
    tracing::info!(service = ?llm_config.generation_service, model = llm_config.get_generation_model(), "using generation model");

    let conn = connect(opt.db).await?;

    let key_store = KeyStore::from_issuer(&opt.auth.oidc_issuer_url).await?;
    tracing::info!(audiences = ?opt.auth.audience, "allowing audiences");
    let auth_config = AuthConfig::new(Arc::new(key_store), opt.auth.audience.into_iter().collect());

    let app = app::create_app(AppConfig::new(llm_config), auth_config, &opt.auth.origins, conn)?;

    let listener = create_listener((opt.host, opt.port), DEFAULT_ADDRESS).await?;
    tracing::info!(local_addr = %listener.local_addr()?, "starting app");
    serve::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn reconcile(opt: Reconcile) -> Result<()> {
    let _guard = setup_tracing(opt.logging)?;
    let conn = connect(opt.db).await?;

    let subject_ids = match opt.subject {
        Some(subject_id) => vec![subject_id],
        None => subject::Query::get_subjects(&conn)
            .await?
            .into_iter()
            .map(|subject| subject.id)
            .collect(),
    };

    for subject_id in subject_ids {
        match subject::Mutation::reconcile_counters(&conn, subject_id).await? {
            Some(subject) => tracing::info!(
                %subject_id,
                note_count = subject.note_count,
                quiz_count = subject.quiz_count,
                "reconciled subject"
            ),
            None => tracing::warn!(%subject_id, "subject not found"),
        }
    }
    Ok(())
}

fn build_connect_options(db_options: &Db) -> ConnectOptions {
    let mut options = ConnectOptions::new(db_options.database_url.as_str());
    if let Some(min_connections) = db_options.db_min_connections {
        options.min_connections(min_connections);
    }
    if let Some(max_connections) = db_options.db_max_connections {
        options.max_connections(max_connections);
    }
    options.sqlx_logging_level(log::LevelFilter::Debug);
    options
}

fn main() -> Result<()> {
    unsafe { env::set_var("RUST_BACKTRACE", "1") };

    let main = async {
        let opt = opt::Cli::parse();

        match opt.command {
            Commands::Run(o) => run(o).await?,
            Commands::Reconcile(o) => reconcile(o).await?,
        }
        Ok(())
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(main)
}
