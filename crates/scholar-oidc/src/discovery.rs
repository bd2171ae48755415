use crate::KeyError;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Deserialize, Debug)]
struct WellKnown {
    jwks_uri: Url,
}

fn discovery_url(issuer: &Url) -> Result<Url, KeyError> {
    let mut issuer = issuer.clone();
    // `join` replaces the last path segment unless the path ends with a slash
    if !issuer.path().ends_with('/') {
        issuer.set_path(&format!("{}/", issuer.path()));
    }
    Ok(issuer.join(".well-known/openid-configuration")?)
}

/// Looks up the key set location of an OpenID Connect issuer.
pub async fn jwks_uri(client: &Client, issuer: &Url) -> Result<Url, KeyError> {
    let url = discovery_url(issuer)?;
    tracing::debug!(%url, "fetching openid configuration");
    let well_known: WellKnown = client.get(url).send().await?.error_for_status()?.json().await?;
    Ok(well_known.jwks_uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_url() {
        let issuer: Url = "https://auth.example.com/realms/scholar".parse().unwrap();
        assert_eq!(
            discovery_url(&issuer).unwrap().as_str(),
            "https://auth.example.com/realms/scholar/.well-known/openid-configuration"
        );

        let issuer: Url = "https://auth.example.com/".parse().unwrap();
        assert_eq!(
            discovery_url(&issuer).unwrap().as_str(),
            "https://auth.example.com/.well-known/openid-configuration"
        );
    }
}
