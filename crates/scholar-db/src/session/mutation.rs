use crate::util::TransactionResultExt;
use base64::Engine;
use chrono::Utc;
use ring::rand::{SecureRandom, SystemRandom};
use scholar_entity::session::{self, ActiveModel, Entity, Model};
use sea_orm::ActiveValue::Set;
use sea_orm::prelude::*;
use sea_orm::{TransactionTrait, sea_query};

pub struct Mutation;

const TOKEN_BYTES: usize = 48;

fn generate_token() -> Result<String, DbErr> {
    let mut bytes = [0u8; TOKEN_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| DbErr::Custom("failed to gather randomness for session token".to_owned()))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

impl Mutation {
    /// Opens a session for the user or returns the one that is already open.
    pub async fn open_session<C: TransactionTrait>(conn: &C, user_id: &str) -> Result<Model, DbErr> {
        let session = ActiveModel {
            user_id: Set(user_id.to_owned()),
            token: Set(generate_token()?),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        let user_id = user_id.to_owned();

        conn.transaction::<_, Model, DbErr>(|txn| {
            Box::pin(async move {
                Entity::insert(session)
                    .on_conflict(
                        sea_query::OnConflict::column(session::Column::UserId)
                            .do_nothing()
                            .to_owned(),
                    )
                    .do_nothing()
                    .exec(txn)
                    .await?;
                Entity::find()
                    .filter(session::Column::UserId.eq(user_id.as_str()))
                    .one(txn)
                    .await?
                    .ok_or_else(|| DbErr::RecordNotFound(format!("session of user {user_id} vanished after insert")))
            })
        })
        .await
        .log_failure("open session")
        .flatten_res()
    }

    /// Ends the session of the user. Closing without an open session is a no-op.
    pub async fn close_session<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<bool, DbErr> {
        let res = Entity::delete_many()
            .filter(session::Column::UserId.eq(user_id))
            .exec(conn)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
