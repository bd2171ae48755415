use scholar_db::quiz::question::NewQuestion as NewQuestionData;
use scholar_db::quiz::quiz::{NewQuiz as NewQuizData, QuizPatch};
use scholar_entity::quiz::question::Model as QuestionModel;
use scholar_entity::quiz::quiz::Model as QuizModel;
use scholar_model::quiz::question::{NewQuestion, Question};
use scholar_model::quiz::{NewQuiz, Quiz, QuizUpdate};

use crate::convert::{FromDbModel, TryFromDbModel, TryFromModel};
use crate::error::Error;

impl FromDbModel<QuizModel> for Quiz {
    fn from_db_model(model: QuizModel) -> Self {
        Self {
            id: model.id,
            subject: model.subject_id,
            title: model.title,
            questions: Vec::new(),
        }
    }
}

impl TryFromDbModel<(QuizModel, Vec<QuestionModel>)> for Quiz {
    type Error = Error;

    fn try_from_db_model((quiz, questions): (QuizModel, Vec<QuestionModel>)) -> Result<Self, Self::Error> {
        let questions = questions
            .into_iter()
            .map(Question::try_from_db_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            questions,
            ..Self::from_db_model(quiz)
        })
    }
}

fn questions_into_data(questions: Vec<NewQuestion>) -> Result<Vec<NewQuestionData>, Error> {
    questions.into_iter().map(NewQuestionData::try_from_model).collect()
}

impl TryFromModel<NewQuiz> for NewQuizData {
    type Error = Error;

    fn try_from_model(model: NewQuiz) -> Result<Self, Self::Error> {
        Ok(Self {
            title: model.title,
            questions: questions_into_data(model.questions)?,
        })
    }
}

impl TryFromModel<QuizUpdate> for QuizPatch {
    type Error = Error;

    fn try_from_model(model: QuizUpdate) -> Result<Self, Self::Error> {
        Ok(Self {
            subject_id: model.subject,
            title: model.title,
            questions: model.questions.map(questions_into_data).transpose()?,
        })
    }
}
