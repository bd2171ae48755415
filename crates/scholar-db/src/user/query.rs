use scholar_entity::session::Column as SessionColumn;
use scholar_entity::session::Entity as Session;
use scholar_entity::user::{self, Entity as UserEntity, Model as User, Role};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use std::error::Error;

pub struct Query;

impl Query {
    pub async fn find_user_by_id<C: ConnectionTrait>(conn: &C, id: &str) -> Result<Option<User>, DbErr> {
        UserEntity::find_by_id(id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, "error loading user");
        })
    }

    /// Resolves the owner of an open session.
    pub async fn find_by_token<C: ConnectionTrait>(conn: &C, token: &str) -> Result<Option<User>, DbErr> {
        UserEntity::find()
            .inner_join(Session)
            .filter(SessionColumn::Token.eq(token))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "error finding user by token");
            })
    }

    pub async fn get_users_by_role<C: ConnectionTrait>(conn: &C, role: Role) -> Result<Vec<User>, DbErr> {
        UserEntity::find()
            .filter(user::Column::Role.eq(role))
            .order_by_asc(user::Column::Name)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, ?role, "error loading users by role");
            })
    }

    pub async fn count_users_by_role<C: ConnectionTrait>(conn: &C, role: Role) -> Result<u64, DbErr> {
        UserEntity::find().filter(user::Column::Role.eq(role)).count(conn).await
    }
}
