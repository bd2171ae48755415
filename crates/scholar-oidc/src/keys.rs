use crate::KeyError;
use jsonwebtoken::jwk::{JwkSet, PublicKeyUse};
use jsonwebtoken::{DecodingKey, TokenData, Validation};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Default, Clone)]
pub struct ValidationOptions {
    pub audience: Option<HashSet<String>>,
    pub issuer: Option<HashSet<String>>,
}

struct Keys {
    by_id: HashMap<String, DecodingKey>,
    fetched_at: Option<Instant>,
}

/// Signing keys of an identity provider.
///
/// Keys are fetched once on startup. A token signed with an unknown key id triggers a refetch,
/// at most once per [`MIN_REFRESH_INTERVAL`], so rotated keys are picked up without a restart.
pub struct KeyStore {
    client: Client,
    jwks_uri: Option<Url>,
    keys: RwLock<Keys>,
}

impl KeyStore {
    pub async fn from_issuer(issuer: &Url) -> Result<Self, KeyError> {
        let client = Client::new();
        let jwks_uri = crate::jwks_uri(&client, issuer).await?;
        Self::from_jwks_uri(client, jwks_uri).await
    }

    pub async fn from_jwks_uri(client: Client, jwks_uri: Url) -> Result<Self, KeyError> {
        let by_id = fetch_keys(&client, &jwks_uri).await?;
        tracing::info!(%jwks_uri, keys = by_id.len(), "loaded signing keys");
        Ok(Self {
            client,
            jwks_uri: Some(jwks_uri),
            keys: RwLock::new(Keys {
                by_id,
                fetched_at: Some(Instant::now()),
            }),
        })
    }

    /// A store with a fixed set of keys that never refetches.
    pub fn from_keys(keys: impl IntoIterator<Item = (String, DecodingKey)>) -> Self {
        Self {
            client: Client::new(),
            jwks_uri: None,
            keys: RwLock::new(Keys {
                by_id: keys.into_iter().collect(),
                fetched_at: None,
            }),
        }
    }

    async fn refetch(&self) -> Result<bool, KeyError> {
        let Some(jwks_uri) = &self.jwks_uri else {
            return Ok(false);
        };
        let mut keys = self.keys.write().await;
        if keys
            .fetched_at
            .is_some_and(|fetched_at| fetched_at.elapsed() < MIN_REFRESH_INTERVAL)
        {
            return Ok(false);
        }
        keys.by_id = fetch_keys(&self.client, jwks_uri).await?;
        keys.fetched_at = Some(Instant::now());
        tracing::info!(%jwks_uri, keys = keys.by_id.len(), "refreshed signing keys");
        Ok(true)
    }

    pub async fn decode<T: DeserializeOwned>(
        &self,
        token: &str,
        options: &ValidationOptions,
    ) -> Result<TokenData<T>, KeyError> {
        let header = jsonwebtoken::decode_header(token)?;
        let kid = header.kid.ok_or(KeyError::MissingField("kid"))?;

        let mut validation = Validation::new(header.alg);
        match &options.audience {
            Some(audience) => validation.aud = Some(audience.clone()),
            None => validation.validate_aud = false,
        }
        validation.iss.clone_from(&options.issuer);

        if let Some(key) = self.keys.read().await.by_id.get(&kid) {
            return Ok(jsonwebtoken::decode(token, key, &validation)?);
        }

        if self.refetch().await? {
            if let Some(key) = self.keys.read().await.by_id.get(&kid) {
                return Ok(jsonwebtoken::decode(token, key, &validation)?);
            }
        }
        Err(KeyError::KeyNotFound(kid))
    }
}

async fn fetch_keys(client: &Client, url: &Url) -> Result<HashMap<String, DecodingKey>, KeyError> {
    let jwk_set: JwkSet = client.get(url.clone()).send().await?.error_for_status()?.json().await?;

    jwk_set
        .keys
        .into_iter()
        .filter(|jwk| jwk.is_supported() && !matches!(jwk.common.public_key_use, Some(PublicKeyUse::Encryption)))
        .filter_map(|jwk| {
            let key = DecodingKey::from_jwk(&jwk);
            jwk.common.key_id.map(|id| key.map(|key| (id, key)))
        })
        .collect::<Result<_, _>>()
        .map_err(KeyError::Jwt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde::{Deserialize, Serialize};
    use test_log::test;

    const SECRET: &[u8] = b"not-a-real-secret";

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        sub: String,
        aud: String,
        exp: u64,
    }

    fn token(kid: &str, aud: &str) -> String {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(kid.to_string());
        let claims = Claims {
            sub: "user-1".to_string(),
            aud: aud.to_string(),
            exp: jsonwebtoken::get_current_timestamp() + 600,
        };
        jsonwebtoken::encode(&header, &claims, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    fn store() -> KeyStore {
        KeyStore::from_keys([("k1".to_string(), DecodingKey::from_secret(SECRET))])
    }

    #[test(tokio::test)]
    async fn test_decode() {
        let options = ValidationOptions {
            audience: Some(HashSet::from(["scholar".to_string()])),
            ..Default::default()
        };
        let data: TokenData<Claims> = store().decode(&token("k1", "scholar"), &options).await.unwrap();
        assert_eq!(data.claims.sub, "user-1");
    }

    #[test(tokio::test)]
    async fn test_wrong_audience() {
        let options = ValidationOptions {
            audience: Some(HashSet::from(["scholar".to_string()])),
            ..Default::default()
        };
        let result = store().decode::<Claims>(&token("k1", "other"), &options).await;
        assert!(matches!(result, Err(KeyError::Jwt(_))));
    }

    #[test(tokio::test)]
    async fn test_unknown_key() {
        let result = store()
            .decode::<Claims>(&token("k2", "scholar"), &ValidationOptions::default())
            .await;
        assert!(matches!(result, Err(KeyError::KeyNotFound(kid)) if kid == "k2"));
    }
}
