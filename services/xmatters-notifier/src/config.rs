//! Configuration types for the xMatters notifier

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::XMattersError;

/// Prefix marking a credential that is read from the environment
const ENV_SECRET_PREFIX: &str = "env:";

const DEFAULT_PRIORITY: &str = "medium";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub notifier: NotifierConfig,
    /// Application settings, e.g. `primaryBaseURL`
    #[serde(default)]
    pub settings: HashMap<String, String>,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Notifier configuration with tagged enum for extensibility
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NotifierConfig {
    #[serde(rename = "xmatters")]
    XMatters(XMattersConfig),
}

impl NotifierConfig {
    pub fn type_name(&self) -> &str {
        match self {
            NotifierConfig::XMatters(_) => "xmatters",
        }
    }

    pub fn xmatters(&self) -> &XMattersConfig {
        match self {
            NotifierConfig::XMatters(config) => config,
        }
    }

    fn xmatters_mut(&mut self) -> &mut XMattersConfig {
        match self {
            NotifierConfig::XMatters(config) => config,
        }
    }
}

/// Per-destination xMatters configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XMattersConfig {
    /// Inbound integration endpoint
    pub url: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(flatten)]
    pub auth: AuthMethod,
}

impl XMattersConfig {
    /// Configured priority, `"medium"` when unset or empty
    pub fn priority(&self) -> &str {
        match self.priority.as_deref() {
            Some(priority) if !priority.is_empty() => priority,
            _ => DEFAULT_PRIORITY,
        }
    }
}

/// How requests to xMatters are authenticated
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "authentication_method")]
pub enum AuthMethod {
    #[serde(rename = "basic")]
    Basic { username: String, password: String },
    #[serde(rename = "apiKey")]
    ApiKey { api_key: String, secret: String },
    #[serde(rename = "oauth")]
    OAuth {
        client_id: String,
        username: String,
        password: String,
    },
}

impl AuthMethod {
    pub fn name(&self) -> &'static str {
        match self {
            AuthMethod::Basic { .. } => "basic",
            AuthMethod::ApiKey { .. } => "apiKey",
            AuthMethod::OAuth { .. } => "oauth",
        }
    }

    fn secrets_mut(&mut self) -> Vec<&mut String> {
        match self {
            AuthMethod::Basic { username, password } => vec![username, password],
            AuthMethod::ApiKey { api_key, secret } => vec![api_key, secret],
            AuthMethod::OAuth {
                client_id,
                username,
                password,
            } => vec![client_id, username, password],
        }
    }
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            AuthMethod::ApiKey { .. } => f.debug_struct("ApiKey").finish_non_exhaustive(),
            AuthMethod::OAuth {
                client_id,
                username,
                ..
            } => f
                .debug_struct("OAuth")
                .field("client_id", client_id)
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Replace `env:NAME` credentials with the value of environment variable `NAME`
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        let auth = &mut self.notifier.xmatters_mut().auth;
        let method = auth.name();
        for value in auth.secrets_mut() {
            if let Some(var) = value.strip_prefix(ENV_SECRET_PREFIX) {
                let resolved = std::env::var(var).map_err(|_| {
                    XMattersError::Config(format!(
                        "Environment variable {} referenced by {} credentials is not set",
                        var, method
                    ))
                })?;
                *value = resolved;
            }
        }
        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        XMattersError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    let notifier = config.notifier.xmatters();
    tracing::debug!(
        "Loaded {} config for {} using {} authentication",
        config.notifier.type_name(),
        notifier.url,
        notifier.auth.name()
    );
    Ok(config)
}
