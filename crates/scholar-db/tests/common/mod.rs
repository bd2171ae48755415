pub mod fixtures;

use scholar_test_helpers::{PostgresqlDb, TestDb};
use sea_orm::{ConnectionTrait, Database, DbConn, DbErr};
use uuid::Uuid;

pub async fn setup_schema(db: &DbConn) -> Result<(), DbErr> {
    let migration = match db.get_database_backend() {
        sea_orm::DatabaseBackend::Postgres => include_str!("postgres.sql"),
        sea_orm::DatabaseBackend::Sqlite => include_str!("sqlite.sql"),
        #[allow(clippy::unimplemented)]
        sea_orm::DatabaseBackend::MySql => unimplemented!(),
    };

    db.execute_unprepared(migration).await?;
    Ok(())
}

#[allow(dead_code)]
pub async fn memory_db() -> DbConn {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();
    db
}

/// Connects to a fresh database with the schema applied.
///
/// The server must outlive the connection, so it is returned alongside it.
#[allow(dead_code)]
pub async fn postgres_db() -> (PostgresqlDb, DbConn) {
    let server = PostgresqlDb::new().await.unwrap();
    let name = format!("scholar_test_{}", Uuid::new_v4().simple());
    {
        let admin = Database::connect(server.db_uri().into_owned()).await.unwrap();
        admin
            .execute_unprepared(&format!("CREATE DATABASE {name}"))
            .await
            .unwrap();
        admin.close().await.unwrap();
    }

    let db = Database::connect(server.database_uri(&name).unwrap()).await.unwrap();
    setup_schema(&db).await.unwrap();
    (server, db)
}
