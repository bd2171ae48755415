use crate::user::ExtractUser;
use axum::RequestExt;
use axum::extract::{FromRequestParts, Request};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::Cached;
use http::StatusCode;
use http::request::Parts;
use scholar_model::user::Role;
use serde_derive::Serialize;
use std::collections::HashSet;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize)]
pub(crate) enum Permission {
    Basic,   // any signed up user
    Teacher, // manages subjects, notes and quizzes
}

#[derive(PartialEq, Eq, Clone, Debug, Default)]
struct Session {
    permissions: HashSet<Permission>,
}

#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
pub(crate) struct Permissions(HashSet<Permission>);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(ExtractUser(user)) = ExtractUser::from_request_parts(parts, state).await else {
            return Ok(Session::default());
        };
        let permissions: Permissions = user.role.into();
        Ok(Session {
            permissions: permissions.0,
        })
    }
}

impl From<Role> for Permissions {
    fn from(role: Role) -> Self {
        let permissions = match role {
            Role::Student => HashSet::from([Permission::Basic]),
            Role::Teacher => HashSet::from([Permission::Basic, Permission::Teacher]),
        };
        Self(permissions)
    }
}

impl<S> FromRequestParts<S> for Permissions
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Cached::<Session>::from_request_parts(parts, state).await?.0;
        Ok(Self(session.permissions))
    }
}

pub(crate) async fn extract(request: &mut Request) -> Result<HashSet<Permission>, Response> {
    request
        .extract_parts::<Permissions>()
        .await
        .map(|permissions| permissions.0)
        .map_err(IntoResponse::into_response)
}
