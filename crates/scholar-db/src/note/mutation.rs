use scholar_entity::note;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel};
use uuid::Uuid;

pub struct Mutation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub subject_id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Mutation {
    /// Inserts the note row only. Counter bookkeeping is done by [`crate::counter::Mutation`].
    pub(crate) async fn insert_note<C: ConnectionTrait>(
        conn: &C,
        subject_id: Uuid,
        note: NewNote,
    ) -> Result<note::Model, DbErr> {
        let note = note::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject_id: Set(subject_id),
            title: Set(note.title),
            content: Set(note.content),
        };
        note.insert(conn).await
    }

    pub(crate) async fn apply_patch<C: ConnectionTrait>(
        conn: &C,
        current: note::Model,
        patch: NotePatch,
    ) -> Result<note::Model, DbErr> {
        if patch == NotePatch::default() {
            return Ok(current);
        }
        let mut note = current.into_active_model();
        if let Some(subject_id) = patch.subject_id {
            note.subject_id = Set(subject_id);
        }
        if let Some(title) = patch.title {
            note.title = Set(title);
        }
        if let Some(content) = patch.content {
            note.content = Set(content);
        }
        note.update(conn).await
    }

    /// Returns whether a row was deleted.
    pub(crate) async fn delete_note<C: ConnectionTrait>(conn: &C, note_id: Uuid) -> Result<bool, DbErr> {
        let res = note::Entity::delete_by_id(note_id).exec(conn).await?;
        Ok(res.rows_affected > 0)
    }
}
