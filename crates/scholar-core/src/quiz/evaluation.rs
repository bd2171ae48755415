use crate::quiz::error::QuizError;
use scholar_db::history::{self, NewHistoryEntry};
use scholar_db::quiz::quiz;
use scholar_model::quiz::Quiz;
use scholar_model::quiz::attempt::{QuestionReview, QuizAttempt, QuizResult};
use scholar_model_tools::convert::TryFromDbModel;
use sea_orm::{ConnectionTrait, TransactionTrait};
use std::error::Error;
use tracing::instrument;
use uuid::Uuid;

/// Percentage of correct answers, rounded half up.
///
/// `total` must not be zero.
#[must_use]
pub fn score(correct: usize, total: usize) -> u8 {
    debug_assert!(total > 0 && correct <= total);
    let rounded = (200 * correct + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Compares the selected answers with the quiz solution.
///
/// Questions without a selected answer count as wrong.
pub fn evaluate_attempt(quiz: &Quiz, attempt: &QuizAttempt) -> Result<QuizResult, QuizError> {
    if quiz.questions.is_empty() {
        return Err(QuizError::Empty(quiz.id));
    }

    let review: Vec<QuestionReview> = quiz
        .questions
        .iter()
        .map(|question| {
            let selected = attempt.answers.get(&question.id).copied();
            let correct_answer = question.correct_answer.unwrap_or_default();
            QuestionReview {
                question_id: question.id,
                selected,
                correct_answer,
                correct: question.correct_answer.is_some() && selected == question.correct_answer,
            }
        })
        .collect();

    let correct = review.iter().filter(|review| review.correct).count();
    let total = review.len();

    Ok(QuizResult {
        quiz_id: quiz.id,
        score: score(correct, total),
        correct,
        total,
        review,
    })
}

/// Scores an attempt and appends it to the history of `user_id`.
#[instrument(skip(conn, attempt))]
pub async fn submit_attempt<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    user_id: &str,
    quiz_id: Uuid,
    attempt: &QuizAttempt,
) -> Result<QuizResult, QuizError> {
    let stored = quiz::Query::find_quiz_with_questions(conn, quiz_id)
        .await?
        .ok_or(QuizError::NotFound(quiz_id))?;
    let quiz = Quiz::try_from_db_model(stored).inspect_err(|error| {
        tracing::error!(error = error as &dyn Error, %quiz_id, "stored quiz is malformed");
    })?;

    let result = evaluate_attempt(&quiz, attempt)?;

    history::Mutation::append_entry(
        conn,
        user_id,
        NewHistoryEntry {
            quiz_id,
            quiz_title: quiz.title,
            subject_id: quiz.subject,
            score: i32::from(result.score),
        },
    )
    .await?;

    tracing::info!(%quiz_id, score = result.score, "quiz submitted");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_model::quiz::question::Question;
    use std::collections::HashMap;

    fn question(correct_answer: usize) -> Question {
        Question {
            id: Uuid::new_v4(),
            text: "Pick one".to_owned(),
            options: vec!["1".to_owned(), "2".to_owned(), "3".to_owned(), "4".to_owned()],
            correct_answer: Some(correct_answer),
        }
    }

    fn quiz(questions: Vec<Question>) -> Quiz {
        Quiz {
            id: Uuid::new_v4(),
            subject: Uuid::new_v4(),
            title: "Numbers".to_owned(),
            questions,
        }
    }

    #[test]
    fn test_score_rounding() {
        assert_eq!(score(2, 3), 67);
        assert_eq!(score(1, 3), 33);
        assert_eq!(score(1, 8), 13);
        assert_eq!(score(0, 5), 0);
        assert_eq!(score(5, 5), 100);
        assert_eq!(score(1, 2), 50);
    }

    #[test]
    fn test_two_of_three_correct() {
        let quiz = quiz(vec![question(0), question(1), question(2)]);
        let attempt = QuizAttempt {
            answers: HashMap::from([
                (quiz.questions[0].id, 0),
                (quiz.questions[1].id, 1),
                (quiz.questions[2].id, 3),
            ]),
        };

        let result = evaluate_attempt(&quiz, &attempt).unwrap();
        assert_eq!(result.score, 67);
        assert_eq!(result.correct, 2);
        assert_eq!(result.total, 3);
        assert!(!result.review[2].correct);
        assert_eq!(result.review[2].selected, Some(3));
        assert_eq!(result.review[2].correct_answer, 2);
    }

    #[test]
    fn test_answer_matches_by_index() {
        let quiz = quiz(vec![question(2)]);
        let id = quiz.questions[0].id;

        let right = QuizAttempt {
            answers: HashMap::from([(id, 2)]),
        };
        assert_eq!(evaluate_attempt(&quiz, &right).unwrap().score, 100);

        let wrong = QuizAttempt {
            answers: HashMap::from([(id, 0)]),
        };
        assert_eq!(evaluate_attempt(&quiz, &wrong).unwrap().score, 0);
    }

    #[test]
    fn test_unanswered_counts_as_wrong() {
        let quiz = quiz(vec![question(1), question(1)]);
        let attempt = QuizAttempt {
            answers: HashMap::from([(quiz.questions[0].id, 1), (Uuid::new_v4(), 1)]),
        };
        let result = evaluate_attempt(&quiz, &attempt).unwrap();
        assert_eq!(result.score, 50);
        assert_eq!(result.review[1].selected, None);
    }

    #[test]
    fn test_empty_quiz_cannot_be_scored() {
        let quiz = quiz(Vec::new());
        assert!(matches!(
            evaluate_attempt(&quiz, &QuizAttempt::default()),
            Err(QuizError::Empty(_))
        ));
    }
}
