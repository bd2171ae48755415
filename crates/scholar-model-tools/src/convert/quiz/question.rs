use scholar_db::quiz::question::NewQuestion as NewQuestionData;
use scholar_entity::quiz::question::Model as QuestionModel;
use scholar_model::quiz::question::{NewQuestion, Question};

use crate::convert::{TryFromDbModel, TryFromModel};
use crate::error::Error;

impl TryFromDbModel<QuestionModel> for Question {
    type Error = Error;

    fn try_from_db_model(model: QuestionModel) -> Result<Self, Self::Error> {
        let options: Vec<String> = serde_json::from_str(&model.options)?;
        let correct_answer =
            usize::try_from(model.correct_answer).map_err(|_| Error::NumConversion("correct answer"))?;

        Ok(Self {
            id: model.id,
            text: model.text,
            options,
            correct_answer: Some(correct_answer),
        })
    }
}

impl TryFromModel<NewQuestion> for NewQuestionData {
    type Error = Error;

    fn try_from_model(model: NewQuestion) -> Result<Self, Self::Error> {
        Ok(Self {
            text: model.text,
            options: model.options,
            correct_answer: i32::try_from(model.correct_answer)
                .map_err(|_| Error::NumConversion("correct answer"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{TryIntoDbModel, TryIntoModel};
    use uuid::Uuid;

    #[test]
    fn test_question_from_row() {
        let row = QuestionModel {
            id: Uuid::new_v4(),
            quiz_id: Uuid::new_v4(),
            position: 0,
            text: "2 + 2?".to_owned(),
            options: r#"["1","2","3","4"]"#.to_owned(),
            correct_answer: 3,
        };
        let question: Question = row.clone().try_into_model().unwrap();
        assert_eq!(question.options, vec!["1", "2", "3", "4"]);
        assert_eq!(question.correct_answer, Some(3));

        let broken = QuestionModel {
            options: "not json".to_owned(),
            ..row
        };
        assert!(TryIntoModel::<Question>::try_into_model(broken).is_err());
    }

    #[test]
    fn test_new_question_into_data() {
        let question = NewQuestion {
            text: "2 + 2?".to_owned(),
            options: vec!["3".to_owned(), "4".to_owned()],
            correct_answer: 1,
        };
        let data: NewQuestionData = question.try_into_db_model().unwrap();
        assert_eq!(data.correct_answer, 1);
    }
}
