//! Monitor and heartbeat records handed over by the alert router

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of monitor, as far as address resolution cares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorKind {
    Ping,
    Port,
    /// Every other monitor type (http, keyword, dns, ...)
    #[serde(untagged)]
    Other(String),
}

/// Description of the monitored target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorInfo {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MonitorKind,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub url: Option<String>,
}

impl MonitorInfo {
    /// The address reported as the alert source.
    ///
    /// Port monitors report `host[:port]`; anything else with a hostname
    /// reports the hostname; the rest fall back to the URL.
    pub fn address(&self) -> String {
        match (&self.kind, &self.hostname) {
            (MonitorKind::Port, hostname) => {
                let mut address = hostname.clone().unwrap_or_default();
                if let Some(port) = self.port {
                    address.push(':');
                    address.push_str(&port.to_string());
                }
                address
            }
            (_, Some(hostname)) => hostname.clone(),
            (_, None) => self.url.clone().unwrap_or_default(),
        }
    }
}

/// Status carried by a heartbeat, using the monitoring app's numeric encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum HeartbeatStatus {
    Down,
    Up,
    Pending,
    Maintenance,
    /// A status this notifier does not know about
    Other(u8),
}

impl From<u8> for HeartbeatStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => HeartbeatStatus::Down,
            1 => HeartbeatStatus::Up,
            2 => HeartbeatStatus::Pending,
            3 => HeartbeatStatus::Maintenance,
            other => HeartbeatStatus::Other(other),
        }
    }
}

impl From<HeartbeatStatus> for u8 {
    fn from(status: HeartbeatStatus) -> Self {
        match status {
            HeartbeatStatus::Down => 0,
            HeartbeatStatus::Up => 1,
            HeartbeatStatus::Pending => 2,
            HeartbeatStatus::Maintenance => 3,
            HeartbeatStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for HeartbeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeartbeatStatus::Down => write!(f, "Down"),
            HeartbeatStatus::Up => write!(f, "Up"),
            HeartbeatStatus::Pending => write!(f, "Pending"),
            HeartbeatStatus::Maintenance => write!(f, "Maintenance"),
            HeartbeatStatus::Other(value) => write!(f, "Unknown ({})", value),
        }
    }
}

/// A heartbeat that triggered the notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heartbeat {
    pub status: HeartbeatStatus,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Path of a monitor's page inside the monitoring UI
pub fn monitor_relative_url(id: Option<u64>) -> String {
    match id {
        Some(id) => format!("/dashboard/{}", id),
        None => "/dashboard/".to_string(),
    }
}
