use scholar_db::counter::{ChildData, ChildError, ChildKind, Mutation};
use scholar_db::note::NewNote;
use scholar_db::subject;
use scholar_entity::note::Model as NoteModel;
use scholar_entity::subject::Model as SubjectModel;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_find_subject() -> Result<(), DbErr> {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![SubjectModel {
            id,
            name: "Math".to_owned(),
            description: "Numbers".to_owned(),
            image: None,
            note_count: 3,
            quiz_count: 1,
        }]])
        .into_connection();

    let subject = subject::Query::find_subject_by_id(&db, id).await?.unwrap();
    assert_eq!(subject.name, "Math");
    assert_eq!(subject.note_count, 3);
    Ok(())
}

#[test(tokio::test)]
async fn test_increment_reports_missing_subject() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let counter = scholar_entity::subject::Column::NoteCount;
    assert!(subject::Mutation::increment_counter(&db, Uuid::new_v4(), counter).await?);
    assert!(!subject::Mutation::increment_counter(&db, Uuid::new_v4(), counter).await?);
    Ok(())
}

#[test(tokio::test)]
async fn test_create_child_aborts_without_subject() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let res = Mutation::create_child_and_increment(
        &db,
        Uuid::new_v4(),
        ChildData::Note(NewNote {
            title: "Algebra".to_owned(),
            content: String::new(),
        }),
    )
    .await;
    assert!(matches!(res, Err(ChildError::SubjectNotFound(_))));
}

#[test(tokio::test)]
async fn test_delete_of_vanished_note_leaves_counter() {
    let note_id = Uuid::new_v4();
    // the row is seen but already gone by the time it is deleted, no exec result is queued for
    // a decrement
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![NoteModel {
            id: note_id,
            subject_id: Uuid::new_v4(),
            title: "Algebra".to_owned(),
            content: String::new(),
        }]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let res = Mutation::delete_child_and_decrement(&db, ChildKind::Note, note_id).await;
    assert!(matches!(res, Err(ChildError::ChildNotFound(ChildKind::Note, id)) if id == note_id));

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("FOR UPDATE"));
    assert!(!log.contains("note_count"));
}
