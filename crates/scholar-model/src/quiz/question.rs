use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Question {
    pub id: Uuid,
    #[schema(example = "What is 2 + 2?")]
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`, withheld from students before submission
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub correct_answer: Option<usize>,
}

impl Question {
    pub fn sanitize_for_client(&mut self) {
        self.correct_answer = None;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl NewQuestion {
    /// Checks the question as the `index`-th of a quiz.
    pub fn validate_at(&self, index: usize) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion { question: index });
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(ValidationError::TooFewOptions {
                question: index,
                min: MIN_OPTIONS,
            });
        }
        if let Some(option) = self.options.iter().position(|option| option.trim().is_empty()) {
            return Err(ValidationError::EmptyOption {
                question: index,
                option,
            });
        }
        if self.correct_answer >= self.options.len() {
            return Err(ValidationError::AnswerOutOfRange {
                question: index,
                answer: self.correct_answer,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: &[&str], correct_answer: usize) -> NewQuestion {
        NewQuestion {
            text: "Pick one".to_owned(),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            correct_answer,
        }
    }

    #[test]
    fn test_validate_question() {
        assert_eq!(question(&["1", "2", "3", "4"], 2).validate_at(0), Ok(()));
        assert_eq!(
            question(&["only"], 0).validate_at(3),
            Err(ValidationError::TooFewOptions { question: 3, min: 2 })
        );
        assert_eq!(
            question(&["1", " "], 0).validate_at(0),
            Err(ValidationError::EmptyOption { question: 0, option: 1 })
        );
        assert_eq!(
            question(&["1", "2"], 2).validate_at(0),
            Err(ValidationError::AnswerOutOfRange { question: 0, answer: 2 })
        );

        let mut blank = question(&["1", "2"], 0);
        blank.text = String::new();
        assert_eq!(blank.validate_at(1), Err(ValidationError::EmptyQuestion { question: 1 }));
    }
}
