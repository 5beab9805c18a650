//! Front end ↔ host signal contract
//!
//! Signals are JSON objects tagged by `"signal"` with an optional
//! `"payload"`, e.g. `{"signal":"persist-settings","payload":{"opacity":50}}`.

use anyhow::{Context, Result};

mod messages;
pub use messages::{InboundSignal, OutboundSignal};

impl InboundSignal {
    /// Decode a signal sent by a front end
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize inbound signal from JSON")
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            InboundSignal::SwitchToTimer(_) => "switch-to-timer",
            InboundSignal::SwitchToSetup => "switch-to-setup",
            InboundSignal::FireNotification { .. } => "fire-notification",
            InboundSignal::PersistSettings(_) => "persist-settings",
            InboundSignal::RequestQuit => "request-quit",
        }
    }
}

impl OutboundSignal {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize outbound signal to JSON")
    }
}
