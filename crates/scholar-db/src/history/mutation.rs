use chrono::Utc;
use scholar_entity::history;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub quiz_id: Uuid,
    pub quiz_title: String,
    pub subject_id: Uuid,
    pub score: i32,
}

impl Mutation {
    /// Records a finished quiz attempt. History entries are never updated or removed.
    pub async fn append_entry<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        entry: NewHistoryEntry,
    ) -> Result<history::Model, DbErr> {
        let entry = history::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_owned()),
            quiz_id: Set(entry.quiz_id),
            quiz_title: Set(entry.quiz_title),
            subject_id: Set(entry.subject_id),
            score: Set(entry.score),
            created_at: Set(Utc::now().naive_utc()),
        };
        entry.insert(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, user_id, "failed to append quiz history");
        })
    }
}
