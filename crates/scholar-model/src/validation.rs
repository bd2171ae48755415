use thiserror::Error;

/// Input that has to be checked before it reaches the database.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("title must be at least {min} characters long")]
    TitleTooShort { min: usize },
    #[error("a quiz needs at least one question")]
    NoQuestions,
    #[error("question {question} has no text")]
    EmptyQuestion { question: usize },
    #[error("question {question} needs at least {min} options")]
    TooFewOptions { question: usize, min: usize },
    #[error("option {option} of question {question} is empty")]
    EmptyOption { question: usize, option: usize },
    #[error("correct answer {answer} of question {question} is not one of its options")]
    AnswerOutOfRange { question: usize, answer: usize },
    #[error("number of questions must be between {min} and {max}, got {requested}")]
    QuestionCount { requested: u8, min: u8, max: u8 },
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}
