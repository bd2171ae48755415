//! Aggregates for teachers.

use scholar_db::history;
use scholar_db::quiz::quiz;
use scholar_db::{subject, user};
use scholar_entity::user::Role as RoleModel;
use scholar_model::stats::Stats;
use scholar_model::user::StudentOverview;
use scholar_model_tools::convert::IntoModel;
use sea_orm::{ConnectionTrait, DbErr};
use std::collections::HashMap;

/// All students with the number of quizzes they took and their rounded mean score.
pub async fn student_overview<C: ConnectionTrait>(conn: &C) -> Result<Vec<StudentOverview>, DbErr> {
    let (students, summaries) = futures::try_join!(
        user::Query::get_users_by_role(conn, RoleModel::Student),
        history::Query::get_score_summaries(conn, RoleModel::Student),
    )?;

    let mut summaries: HashMap<String, history::ScoreSummary> = summaries
        .into_iter()
        .map(|summary| (summary.user_id.clone(), summary))
        .collect();

    Ok(students
        .into_iter()
        .map(|student| {
            let summary = summaries.remove(&student.id);
            StudentOverview {
                quizzes_taken: summary
                    .as_ref()
                    .map_or(0, |summary| u32::try_from(summary.quizzes_taken).unwrap_or(u32::MAX)),
                avg_score: summary
                    .as_ref()
                    .and_then(history::ScoreSummary::average_score)
                    .and_then(|score| u8::try_from(score).ok()),
                profile: student.into_model(),
            }
        })
        .collect())
}

pub async fn dashboard_stats<C: ConnectionTrait>(conn: &C) -> Result<Stats, DbErr> {
    let (subjects, quizzes, students) = futures::try_join!(
        subject::Query::count_subjects(conn),
        quiz::Query::count_quizzes(conn),
        user::Query::count_users_by_role(conn, RoleModel::Student),
    )?;
    Ok(Stats {
        subjects,
        quizzes,
        students,
    })
}
