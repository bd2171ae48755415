use scholar_entity::quiz::question::{self, Entity as Question, Model as QuestionModel};
use scholar_entity::quiz::quiz::{self, Entity as Quiz, Model as QuizModel};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get_quizzes<C: ConnectionTrait>(conn: &C) -> Result<Vec<QuizModel>, DbErr> {
        Quiz::find()
            .order_by_asc(quiz::Column::Title)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load quizzes");
            })
    }

    pub async fn get_quizzes_by_subject<C: ConnectionTrait>(
        conn: &C,
        subject_id: Uuid,
    ) -> Result<Vec<QuizModel>, DbErr> {
        Quiz::find()
            .filter(quiz::Column::SubjectId.eq(subject_id))
            .order_by_asc(quiz::Column::Title)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %subject_id, "failed to load quizzes by subject");
            })
    }

    pub async fn find_quiz_by_id<C: ConnectionTrait>(conn: &C, quiz_id: Uuid) -> Result<Option<QuizModel>, DbErr> {
        Quiz::find_by_id(quiz_id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %quiz_id, "failed to load quiz by id");
        })
    }

    pub async fn lock_quiz_by_id<C: ConnectionTrait>(conn: &C, quiz_id: Uuid) -> Result<Option<QuizModel>, DbErr> {
        Quiz::find_by_id(quiz_id).lock_exclusive().one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %quiz_id, "failed to lock quiz");
        })
    }

    /// Loads a quiz with its questions in quiz order.
    pub async fn find_quiz_with_questions<C: ConnectionTrait>(
        conn: &C,
        quiz_id: Uuid,
    ) -> Result<Option<(QuizModel, Vec<QuestionModel>)>, DbErr> {
        let Some(quiz) = Self::find_quiz_by_id(conn, quiz_id).await? else {
            return Ok(None);
        };
        let questions = Question::find()
            .filter(question::Column::QuizId.eq(quiz_id))
            .order_by_asc(question::Column::Position)
            .all(conn)
            .await?;
        Ok(Some((quiz, questions)))
    }

    pub async fn count_quizzes<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
        Quiz::find().count(conn).await
    }
}
