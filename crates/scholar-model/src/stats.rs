use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Totals shown on the teacher dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Stats {
    pub subjects: u64,
    pub quizzes: u64,
    pub students: u64,
}
