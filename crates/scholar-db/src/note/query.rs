use scholar_entity::note::{self, Entity as Note, Model as NoteModel};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get_notes<C: ConnectionTrait>(conn: &C) -> Result<Vec<NoteModel>, DbErr> {
        Note::find()
            .order_by_asc(note::Column::Title)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load notes");
            })
    }

    pub async fn get_notes_by_subject<C: ConnectionTrait>(
        conn: &C,
        subject_id: Uuid,
    ) -> Result<Vec<NoteModel>, DbErr> {
        Note::find()
            .filter(note::Column::SubjectId.eq(subject_id))
            .order_by_asc(note::Column::Title)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %subject_id, "failed to load notes by subject");
            })
    }

    pub async fn find_note_by_id<C: ConnectionTrait>(conn: &C, note_id: Uuid) -> Result<Option<NoteModel>, DbErr> {
        Note::find_by_id(note_id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %note_id, "failed to load note");
        })
    }

    /// Loads a note and locks its row until the surrounding transaction ends.
    ///
    /// A no-op lock on sqlite, which serializes writers anyway.
    pub async fn lock_note_by_id<C: ConnectionTrait>(conn: &C, note_id: Uuid) -> Result<Option<NoteModel>, DbErr> {
        Note::find_by_id(note_id).lock_exclusive().one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %note_id, "failed to lock note");
        })
    }
}
