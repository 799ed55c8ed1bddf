//! Application settings lookup

use std::collections::HashMap;

use async_trait::async_trait;

/// Setting holding the public base URL of the monitoring UI
pub const PRIMARY_BASE_URL: &str = "primaryBaseURL";

/// Read access to persisted application settings
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_setting(&self, key: &str) -> crate::Result<Option<String>>;
}

/// Settings served from the configuration file
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: HashMap<String, String>,
}

impl StaticSettings {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(PRIMARY_BASE_URL.to_string(), base_url.into());
        Self { values }
    }
}

#[async_trait]
impl SettingsStore for StaticSettings {
    async fn get_setting(&self, key: &str) -> crate::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }
}
