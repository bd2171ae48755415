use scholar_entity::subject::{self, Entity as Subject, Model as SubjectModel};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get_subjects<C: ConnectionTrait>(conn: &C) -> Result<Vec<SubjectModel>, DbErr> {
        Subject::find()
            .order_by_asc(subject::Column::Name)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load subjects");
            })
    }

    pub async fn find_subject_by_id<C: ConnectionTrait>(
        conn: &C,
        subject_id: Uuid,
    ) -> Result<Option<SubjectModel>, DbErr> {
        Subject::find_by_id(subject_id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %subject_id, "failed to load subject");
        })
    }

    pub async fn count_subjects<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
        Subject::find().count(conn).await
    }
}
