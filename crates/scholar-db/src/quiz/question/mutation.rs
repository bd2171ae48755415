use scholar_entity::quiz::question;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

pub struct Mutation;

/// A question as written by a teacher, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
}

impl Mutation {
    /// Stores the questions of a quiz in the given order.
    pub(crate) async fn insert_questions<C: ConnectionTrait>(
        conn: &C,
        quiz_id: Uuid,
        questions: Vec<NewQuestion>,
    ) -> Result<(), DbErr> {
        if questions.is_empty() {
            return Ok(());
        }

        let models = questions
            .into_iter()
            .enumerate()
            .map(|(position, question)| {
                let options =
                    serde_json::to_string(&question.options).map_err(|error| DbErr::Custom(error.to_string()))?;
                let position = i32::try_from(position).map_err(|error| DbErr::Custom(error.to_string()))?;
                Ok(question::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    quiz_id: Set(quiz_id),
                    position: Set(position),
                    text: Set(question.text),
                    options: Set(options),
                    correct_answer: Set(question.correct_answer),
                })
            })
            .collect::<Result<Vec<_>, DbErr>>()?;

        question::Entity::insert_many(models).exec(conn).await?;
        Ok(())
    }

    pub(crate) async fn delete_questions_of_quiz<C: ConnectionTrait>(conn: &C, quiz_id: Uuid) -> Result<u64, DbErr> {
        let res = question::Entity::delete_many()
            .filter(question::Column::QuizId.eq(quiz_id))
            .exec(conn)
            .await?;
        Ok(res.rows_affected)
    }

    /// Swaps the whole question list of a quiz.
    pub(crate) async fn replace_questions<C: ConnectionTrait>(
        conn: &C,
        quiz_id: Uuid,
        questions: Vec<NewQuestion>,
    ) -> Result<(), DbErr> {
        Self::delete_questions_of_quiz(conn, quiz_id).await?;
        Self::insert_questions(conn, quiz_id, questions).await
    }
}
