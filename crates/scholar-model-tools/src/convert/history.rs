use scholar_entity::history::Model as HistoryModel;
use scholar_model::history::QuizHistory;

use crate::convert::{FromDbModel, non_negative};

impl FromDbModel<HistoryModel> for QuizHistory {
    fn from_db_model(model: HistoryModel) -> Self {
        Self {
            id: model.id,
            quiz_id: model.quiz_id,
            quiz_title: model.quiz_title,
            subject: model.subject_id,
            score: non_negative(model.score),
            date: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::IntoModel;
    use uuid::Uuid;

    #[test]
    fn test_history_from_row() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let row = HistoryModel {
            id: Uuid::new_v4(),
            user_id: "ada".to_owned(),
            quiz_id: Uuid::new_v4(),
            quiz_title: "Fractions".to_owned(),
            subject_id: Uuid::new_v4(),
            score: 67,
            created_at: date,
        };
        let history: QuizHistory = row.clone().into_model();
        assert_eq!(history.score, 67);
        assert_eq!(history.subject, row.subject_id);
        assert_eq!(history.date, date);
    }
}
