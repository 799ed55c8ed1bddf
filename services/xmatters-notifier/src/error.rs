//! Error types for the xMatters notifier

use std::error::Error as StdError;

/// Errors that can occur while sending an xMatters notification
#[derive(Debug, thiserror::Error)]
pub enum XMattersError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("xMatters notification failed with invalid response!")]
    InvalidResponse,

    #[error("xMatters notification failed with status code {0}")]
    HttpStatus(u16),

    #[error("xMatters token exchange failed: {0}")]
    TokenExchange(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for notifier operations
pub type Result<T> = std::result::Result<T, XMattersError>;

/// A failure of the underlying HTTP transport.
///
/// Callers see one error kind regardless of what went wrong on the wire; the
/// underlying cause stays reachable through [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
