use jsonwebtoken::errors::ErrorKind;
use scholar_oidc::{KeyError, KeyStore, ValidationOptions};
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum AuthError {
    #[error("Identity token was rejected")]
    Unauthorized,
    #[error("Signing keys are unavailable")]
    KeysUnavailable(#[source] KeyError),
}

/// Claims of an identity token issued by the authentication provider.
#[derive(Deserialize, Debug)]
pub(crate) struct IdentityClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Checks a bearer token against the provider's signing keys.
///
/// Returns `Ok(None)` for anything that is not a usable identity token. Such tokens may still
/// be session tokens issued by this server.
pub(crate) async fn validate_id_token(
    token: &str,
    audience: &HashSet<String>,
    key_store: &KeyStore,
) -> Result<Option<IdentityClaims>, AuthError> {
    let options = ValidationOptions {
        audience: Some(audience.clone()),
        ..ValidationOptions::default()
    };
    match key_store.decode::<IdentityClaims>(token, &options).await {
        Ok(token) => Ok(Some(token.claims)),
        Err(KeyError::Jwt(error))
            if !matches!(
                error.kind(),
                ErrorKind::InvalidToken | ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature
            ) =>
        {
            tracing::warn!(error = &error as &dyn Error, "identity token rejected");
            Err(AuthError::Unauthorized)
        }
        Err(error @ KeyError::Reqwest(_)) => Err(AuthError::KeysUnavailable(error)),
        Err(error) => {
            tracing::debug!(error = &error as &dyn Error, "not an identity token");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AUDIENCE, expired_id_token, id_token, key_store};
    use test_log::test;

    fn audience() -> HashSet<String> {
        HashSet::from([AUDIENCE.to_owned()])
    }

    #[test(tokio::test)]
    async fn test_valid_token() {
        let claims = validate_id_token(&id_token("ada", AUDIENCE), &audience(), &key_store())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(claims.sub, "ada");
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
    }

    #[test(tokio::test)]
    async fn test_session_token_is_not_an_identity() {
        let res = validate_id_token("c2Vzc2lvbi10b2tlbg", &audience(), &key_store())
            .await
            .unwrap();
        assert!(res.is_none());
    }

    #[test(tokio::test)]
    async fn test_expired_token() {
        let res = validate_id_token(&expired_id_token("ada"), &audience(), &key_store())
            .await
            .unwrap();
        assert!(res.is_none());
    }

    #[test(tokio::test)]
    async fn test_wrong_audience() {
        let res = validate_id_token(&id_token("ada", "someone-else"), &audience(), &key_store()).await;
        assert!(matches!(res, Err(AuthError::Unauthorized)));
    }
}
