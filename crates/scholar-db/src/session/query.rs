use scholar_entity::session::{self, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct Query;

impl Query {
    pub async fn find_session_by_user<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(session::Column::UserId.eq(user_id))
            .one(conn)
            .await
    }
}
