use super::MIGRATIONS;

use crate::db;
use crate::db::error::DbError;
use diesel::migration::MigrationVersion;
use diesel::prelude::*;
use diesel::sql_query;
use diesel_migrations::MigrationHarness;
use scholar_test_helpers::{PostgresqlDb, TestDb};
use test_log::test;
use uuid::Uuid;

fn revert_all_migrations(conn: &'_ mut PgConnection) -> Result<Vec<MigrationVersion<'_>>, DbError> {
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|err| DbError::MigrationFailed(err.to_string()))
}

/// Creates an empty database on the server so tests sharing a native server stay apart.
fn fresh_database(pg: &PostgresqlDb) -> String {
    let name = format!("scholar_migrations_{}", Uuid::new_v4().simple());
    let mut conn = PgConnection::establish(&pg.db_uri()).unwrap();
    sql_query(format!("CREATE DATABASE {name}")).execute(&mut conn).unwrap();
    pg.database_uri(&name).unwrap()
}

#[test(tokio::test)]
async fn test_migrations() {
    let pg = PostgresqlDb::new().await.unwrap();
    let db_uri = fresh_database(&pg);
    let mut conn = PgConnection::establish(&db_uri).unwrap();
    // twice, so reverting leaves nothing behind
    for _ in 0..2 {
        let migrations = db::run_migrations(&mut conn, MIGRATIONS).unwrap();

        let query = sql_query("SELECT note_count, quiz_count FROM subjects");
        query.clone().execute(&mut conn).unwrap();
        sql_query("SELECT token FROM sessions").execute(&mut conn).unwrap();

        let mut reverted_migrations = revert_all_migrations(&mut conn).unwrap();
        reverted_migrations.reverse();
        assert_eq!(
            migrations,
            reverted_migrations
                .into_iter()
                .map(|mv| mv.as_owned())
                .collect::<Vec<_>>()
        );

        query.execute(&mut conn).unwrap_err();
    }
}
