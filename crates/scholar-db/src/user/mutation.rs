use chrono::Utc;
use scholar_entity::user::{ActiveModel, Entity, Model, Role};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait};
use std::error::Error;

pub struct Mutation;

impl Mutation {
    /// Creates the profile of a freshly registered identity. The role cannot be changed later.
    pub async fn create_user<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        email: Option<String>,
        name: Option<String>,
        role: Role,
    ) -> Result<Model, DbErr> {
        let new_user = ActiveModel {
            id: Set(user_id.to_owned()),
            email: Set(email),
            name: Set(name),
            photo_url: Set(None),
            role: Set(role),
            created_at: Set(Utc::now().naive_utc()),
        };

        Entity::insert(new_user)
            .exec_with_returning(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, user_id, "failed to create user");
            })
    }

    pub async fn update_user<C: ConnectionTrait>(conn: &C, user: ActiveModel) -> Result<Model, DbErr> {
        user.update(conn).await
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<(), DbErr> {
        Entity::delete_by_id(user_id).exec(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, user_id, "failed to delete user");
        })?;
        Ok(())
    }
}
