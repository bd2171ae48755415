use crate::TestDb;
use std::borrow::Cow;
use std::path::PathBuf;
use tempfile::TempDir;
use thiserror::Error;

/// A file backed sqlite database that lives as long as the value.
///
/// Unlike `sqlite::memory:` every connection sees the same data, so migrations run through one
/// connection are visible to a pool opened later.
pub struct SqliteDb {
    _temp_dir: TempDir,
    path: PathBuf,
}

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("temporary path is not valid utf-8")]
    InvalidPath,
}

impl SqliteDb {
    pub fn new() -> Result<Self, SqliteError> {
        let temp_dir = TempDir::with_prefix("test-sqlite-db")?;
        let path = temp_dir.path().join("db.sqlite");
        if path.to_str().is_none() {
            return Err(SqliteError::InvalidPath);
        }
        tracing::info!(?path, "created sqlite test db");
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }
}

impl TestDb for SqliteDb {
    fn db_uri(&self) -> Cow<'_, str> {
        // utf-8 is checked in `new`
        format!("sqlite://{}?mode=rwc", self.path.to_string_lossy()).into()
    }
}
