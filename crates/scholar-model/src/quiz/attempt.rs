use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// Answers selected by a student, keyed by question id.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct QuizAttempt {
    #[schema(value_type = Object)]
    pub answers: HashMap<Uuid, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QuestionReview {
    pub question_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,
    pub correct_answer: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QuizResult {
    pub quiz_id: Uuid,
    /// Percentage of correct answers, rounded
    #[schema(example = 67)]
    pub score: u8,
    pub correct: usize,
    pub total: usize,
    pub review: Vec<QuestionReview>,
}
