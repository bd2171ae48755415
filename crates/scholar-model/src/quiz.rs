pub mod attempt;
pub mod question;

use crate::quiz::question::{NewQuestion, Question};
use crate::validation::{Validate, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const MIN_TITLE_LENGTH: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Quiz {
    pub id: Uuid,
    pub subject: Uuid,
    #[schema(example = "Fractions")]
    pub title: String,
    /// Ordered questions, omitted in listings
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Hides the correct answers of all questions.
    pub fn sanitize_for_client(&mut self) {
        self.questions.iter_mut().for_each(Question::sanitize_for_client);
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewQuiz {
    pub subject: Uuid,
    pub title: String,
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct QuizUpdate {
    /// Moves the quiz to another subject
    #[serde(default)]
    pub subject: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    /// Replaces all questions
    #[serde(default)]
    pub questions: Option<Vec<NewQuestion>>,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().chars().count() < MIN_TITLE_LENGTH {
        return Err(ValidationError::TitleTooShort { min: MIN_TITLE_LENGTH });
    }
    Ok(())
}

fn validate_questions(questions: &[NewQuestion]) -> Result<(), ValidationError> {
    if questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }
    questions
        .iter()
        .enumerate()
        .try_for_each(|(index, question)| question.validate_at(index))
}

impl Validate for NewQuiz {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_questions(&self.questions)
    }
}

impl Validate for QuizUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(questions) = &self.questions {
            validate_questions(questions)?;
        }
        Ok(())
    }
}
