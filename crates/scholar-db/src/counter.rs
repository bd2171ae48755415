//! Creation, deletion and re-parenting of notes and quizzes.
//!
//! Every subject keeps a `note_count` and a `quiz_count`. All writes that change how many children
//! point at a subject go through this module so that the counters and the child tables move in
//! the same transaction. Counter changes are single `UPDATE` statements evaluated by the database,
//! so concurrent writers on one subject serialize on its row instead of overwriting each other.

use crate::note::{self, NewNote, NotePatch};
use crate::quiz::quiz::{self, NewQuiz, QuizPatch};
use crate::subject;
use crate::util::TransactionResultExt;
use scholar_entity::subject::Column as SubjectColumn;
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ChildKind {
    Note,
    Quiz,
}

impl ChildKind {
    /// The subject column counting children of this kind.
    pub fn counter_column(self) -> SubjectColumn {
        match self {
            ChildKind::Note => SubjectColumn::NoteCount,
            ChildKind::Quiz => SubjectColumn::QuizCount,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ChildData {
    Note(NewNote),
    Quiz(NewQuiz),
}

impl ChildData {
    pub fn kind(&self) -> ChildKind {
        match self {
            ChildData::Note(_) => ChildKind::Note,
            ChildData::Quiz(_) => ChildKind::Quiz,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ChildPatch {
    Note(NotePatch),
    Quiz(QuizPatch),
}

impl ChildPatch {
    pub fn kind(&self) -> ChildKind {
        match self {
            ChildPatch::Note(_) => ChildKind::Note,
            ChildPatch::Quiz(_) => ChildKind::Quiz,
        }
    }

    fn subject_id(&self) -> Option<Uuid> {
        match self {
            ChildPatch::Note(patch) => patch.subject_id,
            ChildPatch::Quiz(patch) => patch.subject_id,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChildError {
    #[error("subject {0} not found")]
    SubjectNotFound(Uuid),
    #[error("{0} {1} not found")]
    ChildNotFound(ChildKind, Uuid),
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub struct Mutation;

impl Mutation {
    /// Creates a note or quiz under `subject_id` and counts it on the subject.
    ///
    /// Fails with [`ChildError::SubjectNotFound`] without writing anything if the subject does not
    /// exist. Returns the id of the new child.
    pub async fn create_child_and_increment<C: TransactionTrait>(
        conn: &C,
        subject_id: Uuid,
        data: ChildData,
    ) -> Result<Uuid, ChildError> {
        let kind = data.kind();
        let child_id = conn
            .transaction::<_, Uuid, ChildError>(|txn| {
                Box::pin(async move {
                    if !subject::Mutation::increment_counter(txn, subject_id, kind.counter_column()).await? {
                        return Err(ChildError::SubjectNotFound(subject_id));
                    }

                    let child_id = match data {
                        ChildData::Note(new_note) => note::Mutation::insert_note(txn, subject_id, new_note).await?.id,
                        ChildData::Quiz(new_quiz) => quiz::Mutation::insert_quiz(txn, subject_id, new_quiz).await?.id,
                    };
                    Ok(child_id)
                })
            })
            .await
            .log_failure("create child")
            .flatten_res()?;

        tracing::debug!(%kind, %child_id, %subject_id, "created child");
        Ok(child_id)
    }

    /// Deletes a note or quiz and uncounts it on its subject.
    ///
    /// The child is deleted even if its subject no longer exists. Counters never drop below zero.
    /// The counter only moves if this call removed the row, so of two concurrent deletes of the
    /// same child exactly one succeeds and the other fails with [`ChildError::ChildNotFound`].
    pub async fn delete_child_and_decrement<C: TransactionTrait>(
        conn: &C,
        kind: ChildKind,
        child_id: Uuid,
    ) -> Result<(), ChildError> {
        conn.transaction::<_, (), ChildError>(|txn| {
            Box::pin(async move {
                let subject_id = Self::lock_subject_of(txn, kind, child_id)
                    .await?
                    .ok_or(ChildError::ChildNotFound(kind, child_id))?;

                let deleted = match kind {
                    ChildKind::Note => note::Mutation::delete_note(txn, child_id).await?,
                    ChildKind::Quiz => quiz::Mutation::delete_quiz(txn, child_id).await?,
                };
                if !deleted {
                    return Err(ChildError::ChildNotFound(kind, child_id));
                }

                subject::Mutation::decrement_counter(txn, subject_id, kind.counter_column()).await?;
                Ok(())
            })
        })
        .await
        .log_failure("delete child")
        .flatten_res()?;

        tracing::debug!(%kind, %child_id, "deleted child");
        Ok(())
    }

    /// Updates the fields of a note or quiz.
    ///
    /// Moving the child to another subject shifts one count from the old subject to the new one
    /// in the same transaction. The new subject must exist, a missing old subject is tolerated.
    /// The child row stays locked until commit, so concurrent moves of one child see each other's
    /// result and never count it twice.
    pub async fn update_child<C: TransactionTrait>(
        conn: &C,
        child_id: Uuid,
        patch: ChildPatch,
    ) -> Result<(), ChildError> {
        let kind = patch.kind();
        conn.transaction::<_, (), ChildError>(|txn| {
            Box::pin(async move {
                let current_subject = Self::lock_subject_of(txn, kind, child_id)
                    .await?
                    .ok_or(ChildError::ChildNotFound(kind, child_id))?;

                if let Some(new_subject) = patch.subject_id()
                    && new_subject != current_subject
                {
                    Self::shift_counter(txn, kind, current_subject, new_subject).await?;
                    tracing::debug!(%kind, %child_id, from = %current_subject, to = %new_subject, "moving child");
                }

                match patch {
                    ChildPatch::Note(patch) => {
                        let current = note::Query::find_note_by_id(txn, child_id)
                            .await?
                            .ok_or(ChildError::ChildNotFound(kind, child_id))?;
                        note::Mutation::apply_patch(txn, current, patch).await?;
                    }
                    ChildPatch::Quiz(patch) => {
                        let current = quiz::Query::find_quiz_by_id(txn, child_id)
                            .await?
                            .ok_or(ChildError::ChildNotFound(kind, child_id))?;
                        quiz::Mutation::apply_patch(txn, current, patch).await?;
                    }
                }
                Ok(())
            })
        })
        .await
        .log_failure("update child")
        .flatten_res()
    }

    /// Moves one count from `from` to `to`.
    ///
    /// Subject rows are touched in id order so that opposite moves between the same two subjects
    /// cannot deadlock.
    async fn shift_counter<C: ConnectionTrait>(
        conn: &C,
        kind: ChildKind,
        from: Uuid,
        to: Uuid,
    ) -> Result<(), ChildError> {
        let counter = kind.counter_column();
        if from < to {
            subject::Mutation::decrement_counter(conn, from, counter).await?;
        }
        if !subject::Mutation::increment_counter(conn, to, counter).await? {
            return Err(ChildError::SubjectNotFound(to));
        }
        if from > to {
            subject::Mutation::decrement_counter(conn, from, counter).await?;
        }
        Ok(())
    }

    async fn lock_subject_of<C: ConnectionTrait>(
        conn: &C,
        kind: ChildKind,
        child_id: Uuid,
    ) -> Result<Option<Uuid>, DbErr> {
        let subject_id = match kind {
            ChildKind::Note => note::Query::lock_note_by_id(conn, child_id)
                .await?
                .map(|note| note.subject_id),
            ChildKind::Quiz => quiz::Query::lock_quiz_by_id(conn, child_id)
                .await?
                .map(|quiz| quiz.subject_id),
        };
        Ok(subject_id)
    }
}
