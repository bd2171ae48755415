use scholar_entity::history::{self, Entity as History, Model as HistoryModel};
use scholar_entity::user::{self, Role};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use std::error::Error;

pub struct Query;

/// Aggregated quiz results of one user.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ScoreSummary {
    pub user_id: String,
    pub quizzes_taken: i64,
    pub total_score: i64,
}

impl ScoreSummary {
    /// Rounded mean score, `None` without any attempt.
    pub fn average_score(&self) -> Option<i32> {
        if self.quizzes_taken <= 0 {
            return None;
        }
        let average = (self.total_score as f64 / self.quizzes_taken as f64).round();
        Some(average as i32)
    }
}

impl Query {
    /// History of a user in the order the attempts were submitted.
    pub async fn get_history_by_user<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<Vec<HistoryModel>, DbErr> {
        History::find()
            .filter(history::Column::UserId.eq(user_id))
            .order_by_asc(history::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, user_id, "failed to load quiz history");
            })
    }

    /// Per user attempt count and score sum for every user with the given role.
    ///
    /// Users without any attempt do not appear.
    pub async fn get_score_summaries<C: ConnectionTrait>(conn: &C, role: Role) -> Result<Vec<ScoreSummary>, DbErr> {
        History::find()
            .select_only()
            .column(history::Column::UserId)
            .column_as(Expr::col((history::Entity, history::Column::Id)).count(), "quizzes_taken")
            .column_as(Expr::col((history::Entity, history::Column::Score)).sum(), "total_score")
            .join(JoinType::InnerJoin, history::Relation::User.def())
            .filter(user::Column::Role.eq(role))
            .group_by(history::Column::UserId)
            .into_model::<ScoreSummary>()
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to aggregate quiz scores");
            })
    }
}
