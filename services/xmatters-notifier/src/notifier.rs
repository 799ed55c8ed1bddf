//! Notification provider trait for sending alerts

use async_trait::async_trait;

use crate::config::NotifierConfig;
use crate::monitor::{Heartbeat, MonitorInfo};

/// A destination service that alerts can be routed to
#[async_trait]
pub trait NotificationProvider: Send + Sync + std::fmt::Debug {
    /// Get the provider name (e.g. "xMatters")
    fn name(&self) -> &str;

    /// Send a notification.
    ///
    /// Without a heartbeat this is a test notification. Returns the
    /// confirmation message, or `None` when the event does not warrant a
    /// notification.
    async fn send(
        &self,
        config: &NotifierConfig,
        message: &str,
        monitor: Option<&MonitorInfo>,
        heartbeat: Option<&Heartbeat>,
    ) -> crate::Result<Option<String>>;
}
