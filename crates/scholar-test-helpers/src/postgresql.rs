use crate::TestDb;
use postgresql_embedded::{PostgreSQL, Settings};
use semver::VersionReq;
use std::borrow::Cow;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use thiserror::Error;

/// A postgres server for tests.
///
/// Uses the server behind `POSTGRES_URI` if the variable is set and otherwise downloads and starts
/// an embedded server that is stopped on drop.
pub enum PostgresqlDb {
    Embedded(Box<PostgreSQL>, TempDir),
    Native(String),
}

#[derive(Error, Debug)]
pub enum PgError {
    #[error(transparent)]
    PgEmbed(#[from] postgresql_embedded::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Version(#[from] semver::Error),
}

impl PostgresqlDb {
    pub async fn new() -> Result<Self, PgError> {
        if let Ok(db_uri) = std::env::var("POSTGRES_URI") {
            tracing::info!("using postgres db from env var");
            Ok(Self::new_native(db_uri))
        } else {
            tracing::info!("using embedded postgres db");
            Self::new_embedded().await
        }
    }

    #[must_use]
    pub fn new_native(db_uri: String) -> Self {
        Self::Native(db_uri)
    }

    pub async fn new_embedded() -> Result<Self, PgError> {
        let database_dir = TempDir::with_prefix("test-pg-db")?;
        let pg = Self::start_db(database_dir.path().to_path_buf()).await?;
        Ok(Self::Embedded(Box::new(pg), database_dir))
    }

    async fn setup_db(database_dir: PathBuf) -> Result<PostgreSQL, PgError> {
        // shared between runs so the server binaries are only downloaded once
        let installation_dir = tempfile::env::temp_dir().join("test-pg-installation");
        match std::fs::create_dir(&installation_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }

        let settings = Settings {
            version: VersionReq::parse("=16")?,
            installation_dir,
            password_file: database_dir.join(".pgpass"),
            data_dir: database_dir.join("data"),
            host: "localhost".to_owned(),
            port: 0,
            username: "postgres".to_owned(),
            password: "password".to_owned(),
            temporary: false,
            timeout: Some(Duration::from_secs(10)),
            ..Settings::default()
        };
        let mut pg = PostgreSQL::new(settings);
        tracing::info!("setting up db");
        pg.setup().await?;
        Ok(pg)
    }

    async fn start_db(database_dir: PathBuf) -> Result<PostgreSQL, PgError> {
        const MAX_TRIES: u32 = 5;
        let mut retry = 0;
        loop {
            tracing::info!(retry, "starting db");
            let mut pg = Self::setup_db(database_dir.clone()).await?;
            match pg.start().await {
                Ok(()) => return Ok(pg),
                Err(error) => {
                    retry += 1;
                    if retry >= MAX_TRIES {
                        return Err(error.into());
                    }
                    tracing::warn!(retry, %error, "failed to start db, retrying");
                }
            }
        }
    }

    /// The uri of database `name` on the same server.
    pub fn database_uri(&self, name: &str) -> Result<String, url::ParseError> {
        let mut uri = url::Url::parse(&self.db_uri())?;
        uri.set_path(name);
        Ok(uri.into())
    }
}

impl TestDb for PostgresqlDb {
    fn db_uri(&self) -> Cow<'_, str> {
        match self {
            Self::Embedded(db, ..) => db.settings().url("postgres").into(),
            Self::Native(db_uri) => db_uri.as_str().into(),
        }
    }
}
