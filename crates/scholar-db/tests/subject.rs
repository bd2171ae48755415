mod common;

use crate::common::fixtures::{create_test_subject, test_quiz};
use crate::common::memory_db;
use scholar_db::counter::{ChildData, Mutation as CounterMutation};
use scholar_db::note::NewNote;
use scholar_db::subject::{self, SubjectChanges};
use scholar_entity::note::Entity as Note;
use scholar_entity::quiz::question::Entity as Question;
use scholar_entity::quiz::quiz::Entity as Quiz;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_create_and_list_subjects() {
    let db = &memory_db().await;
    create_test_subject(db, "Physics").await;
    create_test_subject(db, "Math").await;

    let subjects = subject::Query::get_subjects(db).await.unwrap();
    let names: Vec<&str> = subjects.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Math", "Physics"]);
    assert!(subjects.iter().all(|s| s.note_count == 0 && s.quiz_count == 0));
    assert_eq!(subject::Query::count_subjects(db).await.unwrap(), 2);
}

#[test(tokio::test)]
async fn test_update_subject() {
    let db = &memory_db().await;
    let math = create_test_subject(db, "Math").await;

    let updated = subject::Mutation::update_subject(
        db,
        math.id,
        SubjectChanges {
            description: Some("Numbers and shapes".to_owned()),
            image: Some(Some("https://img.example.org/math.png".to_owned())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Math");
    assert_eq!(updated.description, "Numbers and shapes");
    assert_eq!(updated.image.as_deref(), Some("https://img.example.org/math.png"));

    let missing = subject::Mutation::update_subject(db, Uuid::new_v4(), SubjectChanges::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[test(tokio::test)]
async fn test_delete_subject_cascades() {
    let db = &memory_db().await;
    let math = create_test_subject(db, "Math").await;
    let art = create_test_subject(db, "Art").await;

    for subject_id in [math.id, art.id] {
        CounterMutation::create_child_and_increment(
            db,
            subject_id,
            ChildData::Note(NewNote {
                title: "Intro".to_owned(),
                content: String::new(),
            }),
        )
        .await
        .unwrap();
        CounterMutation::create_child_and_increment(db, subject_id, ChildData::Quiz(test_quiz("Basics", 2)))
            .await
            .unwrap();
    }

    assert!(subject::Mutation::delete_subject(db, math.id).await.unwrap());
    assert!(!subject::Mutation::delete_subject(db, math.id).await.unwrap());

    assert_eq!(Note::find().count(db).await.unwrap(), 1);
    assert_eq!(Quiz::find().count(db).await.unwrap(), 1);
    assert_eq!(Question::find().count(db).await.unwrap(), 2);
    assert!(subject::Query::find_subject_by_id(db, art.id).await.unwrap().is_some());
}

#[test(tokio::test)]
async fn test_reconcile_counters() {
    let db = &memory_db().await;
    let math = create_test_subject(db, "Math").await;
    CounterMutation::create_child_and_increment(db, math.id, ChildData::Quiz(test_quiz("Basics", 1)))
        .await
        .unwrap();

    db.execute_unprepared("UPDATE subjects SET note_count = 7, quiz_count = 0")
        .await
        .unwrap();

    let repaired = subject::Mutation::reconcile_counters(db, math.id).await.unwrap().unwrap();
    assert_eq!((repaired.note_count, repaired.quiz_count), (0, 1));

    let missing = subject::Mutation::reconcile_counters(db, Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}
