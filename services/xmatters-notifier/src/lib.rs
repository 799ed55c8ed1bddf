//! xMatters notifier - alert delivery for monitor state changes
//!
//! Turns a test trigger or an up/down transition into an xMatters alert and
//! sends it with basic, API-key or OAuth authentication.

pub mod auth;
pub mod config;
pub mod error;
pub mod event;
pub mod io;
pub mod monitor;
pub mod notifier;
pub mod settings;
pub mod xmatters;

pub use config::{load_config, Config, NotifierConfig};
pub use error::{Result, TransportError, XMattersError};

use std::sync::Arc;
use std::time::Duration;

use crate::io::ReqwestHttpClient;
use crate::monitor::{Heartbeat, MonitorInfo};
use crate::notifier::NotificationProvider;
use crate::settings::StaticSettings;
use crate::xmatters::XMattersNotifier;

/// Build the notifier described by the configuration
pub fn build_notifier(config: &Config) -> Result<Arc<dyn NotificationProvider>> {
    let http = ReqwestHttpClient::new(Duration::from_secs(config.http.timeout_seconds))?;
    let settings = StaticSettings::new(config.settings.clone());

    let notifier: Arc<dyn NotificationProvider> = match &config.notifier {
        NotifierConfig::XMatters(_) => {
            Arc::new(XMattersNotifier::new(Arc::new(http), Arc::new(settings)))
        }
    };
    tracing::debug!("Created {} notifier", notifier.name());
    Ok(notifier)
}

/// Send one notification with the configured notifier
pub async fn run(
    config: &Config,
    message: &str,
    monitor: Option<&MonitorInfo>,
    heartbeat: Option<&Heartbeat>,
) -> Result<Option<String>> {
    let notifier = build_notifier(config)?;
    notifier
        .send(&config.notifier, message, monitor, heartbeat)
        .await
}
