use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QuizHistory {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub quiz_title: String,
    pub subject: Uuid,
    #[schema(example = 67)]
    pub score: u8,
    pub date: NaiveDateTime,
}
