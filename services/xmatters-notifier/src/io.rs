//! HTTP client abstraction for testability

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

/// HTTP response from a request
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    /// Status code, `None` when the transport could not interpret one
    pub status: Option<u16>,
    /// Human-readable status text (e.g. "Created")
    pub status_text: Option<String>,
    pub body: String,
}

/// Username/password pair sent as HTTP basic auth
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A fully assembled JSON POST request
#[derive(Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: serde_json::Value,
    pub basic_auth: Option<BasicAuth>,
}

impl fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    (name.as_str(), "<redacted>")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();
        f.debug_struct("OutboundRequest")
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .field("basic_auth", &self.basic_auth)
            .finish()
    }
}

impl OutboundRequest {
    /// Start a JSON POST to `url` with the content type header set
    pub fn json_post(url: impl Into<String>, body: serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            url: url.into(),
            headers,
            body,
            basic_auth: None,
        }
    }

    pub fn method(&self) -> &'static str {
        "POST"
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a POST request with a JSON body, headers and optional basic auth
    async fn post_json(&self, request: &OutboundRequest) -> Result<HttpResponse, TransportError>;

    /// Send a POST request with form-encoded body
    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError>;
}

/// Production HTTP client using reqwest
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::with_source("Building HTTP client", e))?;
        Ok(Self { client })
    }

    async fn read_response(
        method: &str,
        url: &str,
        response: reqwest::Response,
    ) -> Result<HttpResponse, TransportError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::with_source("Reading response body", e))?;

        tracing::debug!("{} {} -> {} ({} bytes)", method, url, status, body.len());
        Ok(HttpResponse {
            status: Some(status.as_u16()),
            status_text: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(&self, request: &OutboundRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!("{} {}", request.method(), request.url);
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = builder.json(&request.body);
        if let Some(auth) = &request.basic_auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = builder.send().await.map_err(|e| {
            TransportError::with_source(format!("POST {} failed: {}", request.url, e), e)
        })?;

        Self::read_response(request.method(), &request.url, response).await
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| TransportError::with_source(format!("POST {} failed: {}", url, e), e))?;

        Self::read_response("POST", url, response).await
    }
}
