//! xMatters notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::auth;
use crate::config::{NotifierConfig, XMattersConfig};
use crate::event::{Classified, Event};
use crate::io::{HttpClient, HttpResponse, OutboundRequest};
use crate::monitor::{monitor_relative_url, Heartbeat, MonitorInfo};
use crate::notifier::NotificationProvider;
use crate::settings::{SettingsStore, PRIMARY_BASE_URL};
use crate::XMattersError;

/// Confirmation returned when the transport gives no status text
pub const SUCCESS_MESSAGE: &str = "Sent Successfully.";

/// Longest slice of an error response body written to the log
const LOGGED_BODY_CHARS: usize = 200;

/// Name reported to xMatters as the alerting client
pub const CLIENT_NAME: &str = "Uptime Kuma";

/// xMatters notification sender
pub struct XMattersNotifier {
    http: Arc<dyn HttpClient>,
    settings: Arc<dyn SettingsStore>,
}

impl std::fmt::Debug for XMattersNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XMattersNotifier").finish_non_exhaustive()
    }
}

impl XMattersNotifier {
    pub fn new(http: Arc<dyn HttpClient>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { http, settings }
    }

    /// Authenticate, send and classify one notification
    pub async fn post_notification(
        &self,
        config: &XMattersConfig,
        message: &str,
        alert: Classified,
    ) -> crate::Result<String> {
        let mut body = build_body(config, message, &alert);
        let mut request = OutboundRequest::json_post(config.url.clone(), Value::Null);

        auth::authenticate(&config.auth, &mut request, self.http.as_ref()).await?;

        if let Some(base_url) = self.settings.get_setting(PRIMARY_BASE_URL).await? {
            if !base_url.is_empty() {
                add_deep_link(&mut body, &base_url, &alert.target);
            }
        }
        request.body = body;

        tracing::debug!(
            "Sending xMatters notification: title='{}', priority={}",
            alert.title,
            config.priority()
        );

        let response = match self.http.post_json(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("xMatters request failed: {}", e.message());
                return Err(e.into());
            }
        };
        let confirmation = check_result(&response)?;

        tracing::debug!("xMatters notification sent successfully");
        Ok(confirmation)
    }
}

/// JSON body of the notification request
pub fn build_body(config: &XMattersConfig, message: &str, alert: &Classified) -> Value {
    json!({
        "title": alert.title,
        "message": message,
        "status": alert.status,
        "priority": config.priority(),
        "source": alert.target.address(),
        "floodControlId": alert.target.id,
    })
}

fn add_deep_link(body: &mut Value, base_url: &str, target: &MonitorInfo) {
    if let Value::Object(fields) = body {
        fields.insert("client".to_string(), Value::from(CLIENT_NAME));
        fields.insert(
            "client_url".to_string(),
            Value::from(format!("{}{}", base_url, monitor_relative_url(target.id))),
        );
    }
}

/// Classify the response, returning the confirmation message on success
pub fn check_result(response: &HttpResponse) -> crate::Result<String> {
    let Some(status) = response.status else {
        tracing::warn!("xMatters returned a response without status code");
        return Err(XMattersError::InvalidResponse);
    };
    if !(200..300).contains(&status) {
        tracing::warn!("xMatters returned status {}", status);
        tracing::debug!("xMatters error body: {}", body_excerpt(&response.body));
        return Err(XMattersError::HttpStatus(status));
    }

    Ok(match &response.status_text {
        Some(text) => format!("xMatters notification succeed: {}", text),
        None => SUCCESS_MESSAGE.to_string(),
    })
}

// Error bodies can echo the submitted payload; only a prefix is logged.
fn body_excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let excerpt: String = chars.by_ref().take(LOGGED_BODY_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", excerpt)
    } else {
        excerpt
    }
}

#[async_trait]
impl NotificationProvider for XMattersNotifier {
    fn name(&self) -> &str {
        "xMatters"
    }

    async fn send(
        &self,
        config: &NotifierConfig,
        message: &str,
        monitor: Option<&MonitorInfo>,
        heartbeat: Option<&Heartbeat>,
    ) -> crate::Result<Option<String>> {
        let NotifierConfig::XMatters(config) = config;

        let Some(event) = Event::from_records(monitor, heartbeat) else {
            tracing::debug!(
                "Ignoring heartbeat with status {:?}: not an up/down transition",
                heartbeat.map(|h| h.status)
            );
            return Ok(None);
        };

        self.post_notification(config, message, event.classify())
            .await
            .map(Some)
    }
}
