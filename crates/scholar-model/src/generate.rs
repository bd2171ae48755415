use crate::quiz::question::NewQuestion;
use crate::validation::{Validate, ValidationError, require_text};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_QUESTION_COUNT: u8 = 5;
pub const MIN_QUESTION_COUNT: u8 = 1;
pub const MAX_QUESTION_COUNT: u8 = 10;
/// Options every generated question carries
pub const GENERATED_OPTIONS: usize = 4;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NoteDraftRequest {
    #[schema(example = "Mathematics")]
    pub subject: String,
    #[schema(example = "Quadratic equations")]
    pub topic: String,
}

impl Validate for NoteDraftRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("subject", &self.subject)?;
        require_text("topic", &self.topic)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    /// HTML formatted body
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QuizDraftRequest {
    #[schema(example = "Mathematics")]
    pub subject: String,
    #[schema(example = "Fractions")]
    pub title: String,
    /// Defaults to 5
    #[serde(default)]
    #[schema(minimum = 1, maximum = 10)]
    pub num_questions: Option<u8>,
}

impl QuizDraftRequest {
    #[must_use]
    pub fn question_count(&self) -> u8 {
        self.num_questions.unwrap_or(DEFAULT_QUESTION_COUNT)
    }
}

impl Validate for QuizDraftRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("subject", &self.subject)?;
        require_text("title", &self.title)?;
        let requested = self.question_count();
        if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&requested) {
            return Err(ValidationError::QuestionCount {
                requested,
                min: MIN_QUESTION_COUNT,
                max: MAX_QUESTION_COUNT,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QuizDraft {
    pub questions: Vec<NewQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_count() {
        let request: QuizDraftRequest = serde_json::from_str(r#"{"subject":"Math","title":"Fractions"}"#).unwrap();
        assert_eq!(request.question_count(), 5);
        assert_eq!(request.validate(), Ok(()));

        let request = QuizDraftRequest {
            num_questions: Some(11),
            ..request
        };
        assert_eq!(
            request.validate(),
            Err(ValidationError::QuestionCount {
                requested: 11,
                min: 1,
                max: 10
            })
        );

        let request = QuizDraftRequest {
            num_questions: Some(0),
            ..request
        };
        assert!(request.validate().is_err());
    }
}
