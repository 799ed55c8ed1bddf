//! Classification of incoming events into alert title, target and status

use crate::monitor::{Heartbeat, HeartbeatStatus, MonitorInfo, MonitorKind};

/// Title used for the test-button notification
pub const TEST_TITLE: &str = "Uptime Kuma Alert";

/// Address reported for the test-button notification
pub const TEST_SOURCE: &str = "Uptime Kuma Test Button";

/// An event that may trigger a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Test,
    Up(MonitorInfo),
    Down(MonitorInfo),
}

/// The parts of an alert derived from an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub title: String,
    pub target: MonitorInfo,
    pub status: Option<HeartbeatStatus>,
}

impl Event {
    /// Build an event from the records the alert router hands over.
    ///
    /// No heartbeat means the test button was pressed. Heartbeats that are
    /// neither up nor down produce no event.
    pub fn from_records(
        monitor: Option<&MonitorInfo>,
        heartbeat: Option<&Heartbeat>,
    ) -> Option<Self> {
        let Some(heartbeat) = heartbeat else {
            return Some(Event::Test);
        };
        let monitor = monitor.cloned().unwrap_or_else(unnamed_monitor);

        match heartbeat.status {
            HeartbeatStatus::Up => Some(Event::Up(monitor)),
            HeartbeatStatus::Down => Some(Event::Down(monitor)),
            HeartbeatStatus::Pending | HeartbeatStatus::Maintenance | HeartbeatStatus::Other(_) => {
                None
            }
        }
    }

    pub fn classify(self) -> Classified {
        match self {
            Event::Test => Classified {
                title: TEST_TITLE.to_string(),
                target: test_placeholder(),
                status: None,
            },
            Event::Up(target) => Classified {
                title: format!("{} ✅ Up", target.name),
                target,
                status: Some(HeartbeatStatus::Up),
            },
            Event::Down(target) => Classified {
                title: format!("{} 🔴 Down", target.name),
                target,
                status: Some(HeartbeatStatus::Down),
            },
        }
    }
}

/// Synthetic target used for the test-button notification
pub fn test_placeholder() -> MonitorInfo {
    MonitorInfo {
        id: None,
        name: String::new(),
        kind: MonitorKind::Ping,
        hostname: None,
        port: None,
        url: Some(TEST_SOURCE.to_string()),
    }
}

// A heartbeat without a monitor record still yields a (nameless) target.
fn unnamed_monitor() -> MonitorInfo {
    MonitorInfo {
        id: None,
        name: String::new(),
        kind: MonitorKind::Other("unknown".to_string()),
        hostname: None,
        port: None,
        url: None,
    }
}
