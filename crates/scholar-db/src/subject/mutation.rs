use scholar_entity::quiz::{question, quiz};
use scholar_entity::{note, subject};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};
use std::error::Error;
use uuid::Uuid;

use crate::util::TransactionResultExt;

pub struct Mutation;

/// Fields of a subject that can be changed after creation.
///
/// The child counters are deliberately absent, they only move together with their children.
#[derive(Debug, Clone, Default)]
pub struct SubjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<Option<String>>,
}

impl Mutation {
    pub async fn create_subject<C: ConnectionTrait>(
        conn: &C,
        name: String,
        description: String,
        image: Option<String>,
    ) -> Result<subject::Model, DbErr> {
        let subject = subject::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(description),
            image: Set(image),
            note_count: Set(0),
            quiz_count: Set(0),
        };
        subject.insert(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, "failed to create subject");
        })
    }

    pub async fn update_subject<C: ConnectionTrait>(
        conn: &C,
        subject_id: Uuid,
        changes: SubjectChanges,
    ) -> Result<Option<subject::Model>, DbErr> {
        let Some(current) = subject::Entity::find_by_id(subject_id).one(conn).await? else {
            return Ok(None);
        };

        let SubjectChanges {
            name,
            description,
            image,
        } = changes;
        if name.is_none() && description.is_none() && image.is_none() {
            return Ok(Some(current));
        }

        let mut subject = subject::ActiveModel {
            id: Unchanged(subject_id),
            ..Default::default()
        };
        if let Some(name) = name {
            subject.name = Set(name);
        }
        if let Some(description) = description {
            subject.description = Set(description);
        }
        if let Some(image) = image {
            subject.image = Set(image);
        }
        subject.update(conn).await.map(Some)
    }

    /// Deletes a subject together with all of its notes and quizzes.
    ///
    /// Returns `false` if the subject does not exist.
    pub async fn delete_subject<C: TransactionTrait>(conn: &C, subject_id: Uuid) -> Result<bool, DbErr> {
        conn.transaction::<_, bool, DbErr>(|txn| {
            Box::pin(async move {
                if subject::Entity::find_by_id(subject_id).one(txn).await?.is_none() {
                    return Ok(false);
                }

                let quiz_ids: Vec<Uuid> = quiz::Entity::find()
                    .select_only()
                    .column(quiz::Column::Id)
                    .filter(quiz::Column::SubjectId.eq(subject_id))
                    .into_tuple()
                    .all(txn)
                    .await?;

                question::Entity::delete_many()
                    .filter(question::Column::QuizId.is_in(quiz_ids))
                    .exec(txn)
                    .await?;
                let quizzes = quiz::Entity::delete_many()
                    .filter(quiz::Column::SubjectId.eq(subject_id))
                    .exec(txn)
                    .await?;
                let notes = note::Entity::delete_many()
                    .filter(note::Column::SubjectId.eq(subject_id))
                    .exec(txn)
                    .await?;
                subject::Entity::delete_by_id(subject_id).exec(txn).await?;

                tracing::debug!(
                    %subject_id,
                    quizzes = quizzes.rows_affected,
                    notes = notes.rows_affected,
                    "deleted subject with children"
                );
                Ok(true)
            })
        })
        .await
        .log_failure("delete subject")
        .flatten_res()
    }

    /// Adds one to a child counter in a single statement.
    ///
    /// Returns `false` if no subject with the given id exists.
    pub async fn increment_counter<C: ConnectionTrait>(
        conn: &C,
        subject_id: Uuid,
        counter: subject::Column,
    ) -> Result<bool, DbErr> {
        let res = subject::Entity::update_many()
            .col_expr(counter, Expr::col(counter).add(1))
            .filter(subject::Column::Id.eq(subject_id))
            .exec(conn)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Subtracts one from a child counter unless it is already zero.
    ///
    /// A missing subject is not an error.
    pub async fn decrement_counter<C: ConnectionTrait>(
        conn: &C,
        subject_id: Uuid,
        counter: subject::Column,
    ) -> Result<(), DbErr> {
        let res = subject::Entity::update_many()
            .col_expr(counter, Expr::col(counter).sub(1))
            .filter(subject::Column::Id.eq(subject_id))
            .filter(counter.gt(0))
            .exec(conn)
            .await?;
        if res.rows_affected == 0 {
            tracing::debug!(%subject_id, ?counter, "counter not decremented, subject missing or already zero");
        }
        Ok(())
    }

    /// Recomputes both child counters of a subject from the child tables.
    pub async fn reconcile_counters<C: TransactionTrait>(
        conn: &C,
        subject_id: Uuid,
    ) -> Result<Option<subject::Model>, DbErr> {
        conn.transaction::<_, Option<subject::Model>, DbErr>(|txn| {
            Box::pin(async move {
                let Some(current) = subject::Entity::find_by_id(subject_id).one(txn).await? else {
                    return Ok(None);
                };

                let notes = note::Entity::find()
                    .filter(note::Column::SubjectId.eq(subject_id))
                    .count(txn)
                    .await?;
                let quizzes = quiz::Entity::find()
                    .filter(quiz::Column::SubjectId.eq(subject_id))
                    .count(txn)
                    .await?;
                let notes = i32::try_from(notes).map_err(|error| DbErr::Custom(error.to_string()))?;
                let quizzes = i32::try_from(quizzes).map_err(|error| DbErr::Custom(error.to_string()))?;

                if current.note_count == notes && current.quiz_count == quizzes {
                    return Ok(Some(current));
                }
                tracing::info!(
                    %subject_id,
                    note_count = current.note_count,
                    actual_notes = notes,
                    quiz_count = current.quiz_count,
                    actual_quizzes = quizzes,
                    "repairing subject counters"
                );

                let subject = subject::ActiveModel {
                    id: Unchanged(subject_id),
                    note_count: Set(notes),
                    quiz_count: Set(quizzes),
                    ..Default::default()
                };
                subject.update(txn).await.map(Some)
            })
        })
        .await
        .log_failure("reconcile counters")
        .flatten_res()
    }
}
