use crate::quiz::question::{self, NewQuestion};
use scholar_entity::quiz::quiz;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel};
use uuid::Uuid;

pub struct Mutation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    pub title: String,
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizPatch {
    pub subject_id: Option<Uuid>,
    pub title: Option<String>,
    /// Replaces the full question list when present
    pub questions: Option<Vec<NewQuestion>>,
}

impl Mutation {
    /// Inserts a quiz with its questions. Must run inside the caller's transaction.
    pub(crate) async fn insert_quiz<C: ConnectionTrait>(
        conn: &C,
        subject_id: Uuid,
        new_quiz: NewQuiz,
    ) -> Result<quiz::Model, DbErr> {
        let quiz = quiz::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject_id: Set(subject_id),
            title: Set(new_quiz.title),
        };
        let quiz = quiz.insert(conn).await?;

        question::Mutation::insert_questions(conn, quiz.id, new_quiz.questions).await?;

        Ok(quiz)
    }

    pub(crate) async fn apply_patch<C: ConnectionTrait>(
        conn: &C,
        current: quiz::Model,
        patch: QuizPatch,
    ) -> Result<quiz::Model, DbErr> {
        let QuizPatch {
            subject_id,
            title,
            questions,
        } = patch;

        if let Some(questions) = questions {
            question::Mutation::replace_questions(conn, current.id, questions).await?;
        }

        if subject_id.is_none() && title.is_none() {
            return Ok(current);
        }
        let mut quiz = current.into_active_model();
        if let Some(subject_id) = subject_id {
            quiz.subject_id = Set(subject_id);
        }
        if let Some(title) = title {
            quiz.title = Set(title);
        }
        quiz.update(conn).await
    }

    /// Deletes a quiz with its questions. Returns whether the quiz row was deleted.
    pub(crate) async fn delete_quiz<C: ConnectionTrait>(conn: &C, quiz_id: Uuid) -> Result<bool, DbErr> {
        question::Mutation::delete_questions_of_quiz(conn, quiz_id).await?;
        let res = quiz::Entity::delete_by_id(quiz_id).exec(conn).await?;
        Ok(res.rows_affected > 0)
    }
}
