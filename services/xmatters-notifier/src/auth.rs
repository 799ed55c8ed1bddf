//! Attaching credentials to outbound xMatters requests

use serde::Deserialize;

use crate::config::AuthMethod;
use crate::io::{BasicAuth, HttpClient, OutboundRequest};
use crate::XMattersError;

/// Path of the OAuth2 token endpoint on the xMatters host
const TOKEN_PATH: &str = "/api/xm/1/oauth2/token";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Bearer token obtained for a single send
pub struct OAuthToken(String);

impl OAuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OAuthToken(<redacted>)")
    }
}

/// Token endpoint living on the same host as the notification endpoint
pub fn token_url(endpoint: &str) -> crate::Result<String> {
    let parsed = reqwest::Url::parse(endpoint)
        .map_err(|e| XMattersError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| XMattersError::InvalidUrl(format!("{}: missing host", endpoint)))?;
    Ok(format!("https://{}{}", host, TOKEN_PATH))
}

/// Exchange user credentials for a bearer token
pub async fn fetch_oauth_token(
    http: &dyn HttpClient,
    endpoint: &str,
    client_id: &str,
    username: &str,
    password: &str,
) -> crate::Result<OAuthToken> {
    let url = token_url(endpoint)?;
    let params = [
        ("grant_type", "password"),
        ("client_id", client_id),
        ("username", username),
        ("password", password),
    ];

    tracing::debug!("Requesting xMatters OAuth token from {}", url);
    let response = http.post_form(&url, &params).await?;

    match response.status {
        Some(status) if (200..300).contains(&status) => {}
        Some(status) => {
            return Err(XMattersError::TokenExchange(format!(
                "token endpoint returned status {}",
                status
            )))
        }
        None => return Err(XMattersError::InvalidResponse),
    }

    let token: TokenResponse = serde_json::from_str(&response.body).map_err(|e| {
        XMattersError::TokenExchange(format!("unparsable token response: {}", e))
    })?;
    match token.access_token {
        Some(token) if !token.is_empty() => Ok(OAuthToken(token)),
        _ => Err(XMattersError::TokenExchange(
            "response did not contain an access token".to_string(),
        )),
    }
}

/// Attach the credentials selected by `method` to `request`.
///
/// `basic` and `apiKey` both use HTTP basic auth; `oauth` performs a token
/// exchange first and sends the token as a bearer header.
pub async fn authenticate(
    method: &AuthMethod,
    request: &mut OutboundRequest,
    http: &dyn HttpClient,
) -> crate::Result<()> {
    match method {
        AuthMethod::Basic { username, password } => {
            request.basic_auth = Some(BasicAuth {
                username: username.clone(),
                password: password.clone(),
            });
        }
        AuthMethod::ApiKey { api_key, secret } => {
            request.basic_auth = Some(BasicAuth {
                username: api_key.clone(),
                password: secret.clone(),
            });
        }
        AuthMethod::OAuth {
            client_id,
            username,
            password,
        } => {
            let token = fetch_oauth_token(http, &request.url, client_id, username, password).await?;
            request.headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", token.as_str()),
            );
        }
    }
    tracing::debug!("Applied {} authentication", method.name());
    Ok(())
}
